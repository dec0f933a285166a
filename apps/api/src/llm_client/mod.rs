/// LLM Client — the single point of entry for all Gemini API calls in CVision.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// Analysis, roadmap, chat and the connectivity check all go through the
/// `TextGenerator` trait implemented here.
///
/// Rate limiting is handled by a strict linear fallback over a fixed list of
/// models per call profile. No backoff, no state kept across calls.
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

pub mod normalize;
pub mod template;
#[cfg(test)]
pub mod scripted;

/// Sampling parameters, timeout and fallback chain for one kind of call.
#[derive(Debug, Clone, Copy)]
pub struct CallProfile {
    pub name: &'static str,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout: Duration,
    /// Tried in order, only after the primary model answers 429.
    pub fallback_models: &'static [&'static str],
}

pub const ANALYSIS_PROFILE: CallProfile = CallProfile {
    name: "analysis",
    temperature: 0.7,
    max_output_tokens: 8192,
    timeout: Duration::from_secs(120),
    fallback_models: &[
        "gemini-1.5-flash-latest",
        "gemini-1.5-pro-latest",
        "gemini-pro",
    ],
};

pub const ROADMAP_PROFILE: CallProfile = CallProfile {
    name: "roadmap",
    temperature: 0.7,
    max_output_tokens: 4096,
    timeout: Duration::from_secs(120),
    fallback_models: &["gemini-1.5-flash-latest", "gemini-pro"],
};

pub const CHAT_PROFILE: CallProfile = CallProfile {
    name: "chat",
    temperature: 0.8,
    max_output_tokens: 2048,
    timeout: Duration::from_secs(60),
    fallback_models: &["gemini-1.5-flash-latest", "gemini-pro"],
};

/// Connectivity check. Primary model only.
pub const CONNECTION_PROFILE: CallProfile = CallProfile {
    name: "connection",
    temperature: 0.0,
    max_output_tokens: 16,
    timeout: Duration::from_secs(30),
    fallback_models: &[],
};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response envelope parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited on every model (tried: {})", .attempted.join(", "))]
    Exhausted { attempted: Vec<String> },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Malformed model output: {source}")]
    MalformedOutput {
        source: serde_json::Error,
        /// Leading characters of the text that failed to parse.
        prefix: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text at `candidates[0].content.parts[0].text`.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Raw text produced by a model, tagged with the model that produced it.
#[derive(Debug, Clone)]
pub struct Generation {
    pub model: String,
    pub text: String,
}

/// Result of walking the model chain.
#[derive(Debug)]
pub enum ChainOutcome {
    Success { model: String, body: String },
    Exhausted { attempted: Vec<String> },
}

/// Outcome of one POST against one model.
enum Attempt {
    Completed(String),
    RateLimited,
    Rejected { status: u16, message: String },
}

/// Anything that can turn a prompt into model text.
/// `LlmClient` is the production implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn primary_model(&self) -> &str;

    async fn generate(&self, prompt: &str, profile: &CallProfile)
        -> Result<Generation, LlmError>;
}

/// Calls the model and deserializes its reply as JSON after fence stripping.
/// The prompt must instruct the model to return JSON.
pub async fn generate_json<T: DeserializeOwned>(
    llm: &dyn TextGenerator,
    prompt: &str,
    profile: &CallProfile,
) -> Result<T, LlmError> {
    let generation = llm.generate(prompt, profile).await?;
    normalize::normalize_json(&generation.text)
}

/// Gemini `generateContent` client with per-profile model fallback.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            base_url,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.google_api_key.clone(),
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn attempt(
        &self,
        model: &str,
        body: &GenerateContentRequest<'_>,
        timeout: Duration,
    ) -> Result<Attempt, LlmError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(Attempt::Completed(response.text().await?));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(Attempt::RateLimited);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GeminiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Ok(Attempt::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Walks primary → fallbacks and stops at the first HTTP 200.
    ///
    /// - primary 200: success
    /// - primary 429: move to the fallback list
    /// - primary other status or transport error: terminal error
    /// - fallback 200: success; anything else: next fallback
    pub async fn run_chain(
        &self,
        prompt: &str,
        profile: &CallProfile,
    ) -> Result<ChainOutcome, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: profile.temperature,
                max_output_tokens: profile.max_output_tokens,
            },
        };

        let started = Instant::now();
        match self.attempt(&self.model, &request, profile.timeout).await? {
            Attempt::Completed(body) => {
                debug!(
                    "{} call succeeded on {} in {}ms",
                    profile.name,
                    self.model,
                    started.elapsed().as_millis()
                );
                return Ok(ChainOutcome::Success {
                    model: self.model.clone(),
                    body,
                });
            }
            Attempt::RateLimited => {
                warn!(
                    "{} call rate limited on {}, trying fallback models",
                    profile.name, self.model
                );
            }
            Attempt::Rejected { status, message } => {
                return Err(LlmError::Api { status, message });
            }
        }

        let mut attempted = vec![self.model.clone()];
        for model in profile.fallback_models {
            attempted.push(model.to_string());
            info!("Trying fallback model {model}");

            match self.attempt(model, &request, profile.timeout).await {
                Ok(Attempt::Completed(body)) => {
                    info!(
                        "{} call succeeded with fallback model {model} in {}ms",
                        profile.name,
                        started.elapsed().as_millis()
                    );
                    return Ok(ChainOutcome::Success {
                        model: model.to_string(),
                        body,
                    });
                }
                Ok(Attempt::RateLimited) => warn!("Fallback model {model} is rate limited"),
                Ok(Attempt::Rejected { status, message }) => {
                    warn!("Fallback model {model} returned {status}: {message}")
                }
                Err(e) => warn!("Fallback model {model} failed: {e}"),
            }
        }

        Ok(ChainOutcome::Exhausted { attempted })
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    fn primary_model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        profile: &CallProfile,
    ) -> Result<Generation, LlmError> {
        match self.run_chain(prompt, profile).await? {
            ChainOutcome::Success { model, body } => {
                let envelope: GenerateContentResponse = serde_json::from_str(&body)?;
                let text = envelope.text().ok_or(LlmError::EmptyContent)?.to_string();
                Ok(Generation { model, text })
            }
            ChainOutcome::Exhausted { attempted } => Err(LlmError::Exhausted { attempted }),
        }
    }
}
