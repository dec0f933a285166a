//! Scripted `TextGenerator` for tests. Replays queued replies in order and
//! records every prompt it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CallProfile, Generation, LlmError, TextGenerator};

pub const SCRIPTED_MODEL: &str = "scripted-model";

#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<(String, &'static str)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, err: LlmError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().map(|(p, _)| p.clone())
    }

    /// Profile names in call order.
    pub fn profiles(&self) -> Vec<&'static str> {
        self.prompts.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn primary_model(&self) -> &str {
        SCRIPTED_MODEL
    }

    async fn generate(
        &self,
        prompt: &str,
        profile: &CallProfile,
    ) -> Result<Generation, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), profile.name));
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent));
        next.map(|text| Generation {
            model: SCRIPTED_MODEL.to_string(),
            text,
        })
    }
}
