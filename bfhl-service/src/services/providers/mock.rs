//! Mock provider implementation for tests and credential-less development.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock text provider with a canned reply.
pub struct MockTextProvider {
    enabled: bool,
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// A provider that answers `"Mock"`, or fails when not enabled.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            reply: Some("Mock".to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A provider that always returns `reply` verbatim.
    pub fn answering(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::new(true)
        }
    }

    /// A provider that succeeds but returns no content.
    pub fn silent() -> Self {
        Self {
            reply: None,
            ..Self::new(true)
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        Ok(ProviderResponse {
            text: self.reply.clone(),
            input_tokens: (prompt.len() / 4) as u32,
            output_tokens: 1,
        })
    }
}
