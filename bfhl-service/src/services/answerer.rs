//! One-word answers on top of a [`TextProvider`].

use std::sync::Arc;
use std::time::Instant;

use super::metrics;
use super::providers::{GenerationParams, ProviderError, TextProvider};

pub const ONE_WORD_INSTRUCTION: &str = "Answer with ONLY ONE WORD. No explanation.";

/// Asks the provider for a one-word answer and reduces whatever comes back
/// to a single `[A-Za-z0-9_]` token.
#[derive(Clone)]
pub struct OneWordAnswerer {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl OneWordAnswerer {
    pub fn new(provider: Arc<dyn TextProvider>, max_tokens: u32) -> Self {
        Self {
            provider,
            params: GenerationParams {
                system_prompt: Some(ONE_WORD_INSTRUCTION.to_string()),
                max_tokens: Some(max_tokens),
            },
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// No retries: the first provider failure is returned as is.
    #[tracing::instrument(skip(self, question), fields(provider = self.provider.name()))]
    pub async fn answer(&self, question: &str) -> Result<String, ProviderError> {
        let provider = self.provider.name();
        let start = Instant::now();

        let result = self.provider.complete(question, &self.params).await;
        metrics::record_provider_latency(provider, start.elapsed().as_secs_f64());

        let response = result.inspect_err(|e| {
            metrics::record_provider_error(provider, e.error_type());
        })?;

        let text = response.text.ok_or_else(|| {
            metrics::record_provider_error(provider, ProviderError::EmptyResponse.error_type());
            ProviderError::EmptyResponse
        })?;

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Provider answered"
        );

        Ok(first_word(&text))
    }
}

/// First whitespace-separated token of `text`, keeping only ASCII letters,
/// digits and underscores. May be empty.
pub fn first_word(text: &str) -> String {
    text.split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
