//! LLM completion provider client.

use async_trait::async_trait;
use rig::completion::Chat;
use rig::prelude::*;
use tracing::debug;

use crate::error::{DiscoveryError, Result};

/// Chat model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Text-completion capability consumed by the recommendation orchestrator.
///
/// Sampling bounds are passed per call by the orchestrator.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one completion round and return the model's raw text.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u64,
        temperature: f64,
    ) -> Result<String>;
}

/// OpenAI-backed implementation of [`CompletionProvider`].
pub struct OpenAiCompletion {
    client: rig::providers::openai::Client,
    model: String,
}

impl OpenAiCompletion {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: rig::providers::openai::Client::new(api_key),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletion {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u64,
        temperature: f64,
    ) -> Result<String> {
        debug!(model = %self.model, max_tokens, temperature, "completion request");

        let agent = self
            .client
            .agent(&self.model)
            .preamble(system_prompt)
            .max_tokens(max_tokens)
            .temperature(temperature)
            .build();

        agent
            .chat(user_prompt, vec![])
            .await
            .map_err(|e| DiscoveryError::Network {
                reason: format!("completion request failed: {e}"),
            })
    }
}
