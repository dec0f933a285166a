//! Per-flow session context held in memory only.
//!
//! A session is created by a successful upload and lives until the user resets
//! it, its TTL runs out, or the store evicts it to stay under `MAX_SESSIONS`. The store lock is never held across an LLM call:
//! handlers take a snapshot, call the model, then write the result back.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AnalysisResult, RoadmapResult};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub resume_text: String,
    pub analysis: AnalysisResult,
    pub career_goal: Option<String>,
    pub roadmap: Option<RoadmapResult>,
}

impl Session {
    pub fn new(resume_text: String, analysis: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            resume_text,
            analysis,
            career_goal: None,
            roadmap: None,
        }
    }

    /// Drops the goal and any roadmap built for it.
    pub fn reset_goal(&mut self) {
        self.career_goal = None;
        self.roadmap = None;
    }
}

/// Sessions older than this are treated as gone.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 12 * 60;

/// Upper bound on live sessions; the oldest is evicted to make room.
pub const MAX_SESSIONS: usize = 1_000;

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES), MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.created_at >= self.ttl
    }

    /// Stores a new session. Expired sessions are swept first; if the store is
    /// still full the oldest session is evicted.
    pub async fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        let now = Utc::now();
        let mut sessions = self.inner.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| !self.is_expired(s, now));
        let expired = before - sessions.len();
        if expired > 0 {
            debug!("Evicted {expired} expired sessions");
        }

        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id)
            else {
                break;
            };
            sessions.remove(&oldest);
            warn!("Session limit reached; evicted session {oldest}");
        }

        sessions.insert(id, session);
        id
    }

    /// Cloned snapshot of a live session.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        let now = Utc::now();
        self.inner
            .read()
            .await
            .get(&id)
            .filter(|s| !self.is_expired(s, now))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Applies `f` to the stored session and returns the updated snapshot.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Result<Session, AppError>
    where
        F: FnOnce(&mut Session),
    {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;

        let expired = match sessions.get(&id) {
            Some(session) => self.is_expired(session, now),
            None => return Err(not_found(id)),
        };
        if expired {
            sessions.remove(&id);
            return Err(not_found(id));
        }

        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        f(session);
        Ok(session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let now = Utc::now();
        match self.inner.write().await.remove(&id) {
            Some(session) if !self.is_expired(&session, now) => Ok(()),
            _ => Err(not_found(id)),
        }
    }

    /// Live sessions only.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.inner
            .read()
            .await
            .values()
            .filter(|s| !self.is_expired(s, now))
            .count()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
