//! Summarize (Mermaid only), build the prompt, make the one completion call.
use crate::completion::{CompletionClient, CompletionOutcome};
use crate::config::Config;
use crate::error::AppResult;
use crate::prompt::builder::build_prompt;
use crate::summarizer::SharedSummarizer;
use crate::variant::Variant;

/// Variant-neutral form of a chart or diagram request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub user_input: String,
    pub output_type: String,
}

impl GenerationRequest {
    pub fn new(user_input: impl Into<String>, output_type: impl Into<String>) -> Self {
        GenerationRequest { user_input: user_input.into(), output_type: output_type.into() }
    }
}

pub struct Pipeline {
    variant: Variant,
    client: CompletionClient,
    summarizer: SharedSummarizer,
}

impl Pipeline {
    pub fn new(variant: Variant, client: CompletionClient, summarizer: SharedSummarizer) -> Self {
        Pipeline { variant, client, summarizer }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = CompletionClient::new(
            config.perplexity_url.clone(),
            config.perplexity_api_key.clone(),
            config.variant,
        );
        let summarizer = SharedSummarizer::hosted(config.summarizer_url.clone(), config.hf_api_token.clone());
        Pipeline::new(config.variant, client, summarizer)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Load the summarizer now instead of on the first request. No-op for
    /// variants that don't summarize.
    pub async fn warm_up(&self) -> AppResult<()> {
        if self.variant.summarizes_input() {
            self.summarizer.get().await?;
        }
        Ok(())
    }

    /// Text that goes into the prompt: the summary for Mermaid, the input
    /// itself otherwise.
    pub async fn prompt_data(&self, user_input: &str) -> String {
        if self.variant.summarizes_input() {
            self.summarizer.summarize_or_marker(user_input).await
        } else {
            user_input.to_string()
        }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> CompletionOutcome {
        let data = self.prompt_data(&request.user_input).await;
        self.generate_from_data(&data, &request.output_type).await
    }

    /// Prompt with already prepared `data` (see [`Pipeline::prompt_data`]) and
    /// make the completion call.
    pub async fn generate_from_data(&self, data: &str, output_type: &str) -> CompletionOutcome {
        let prompt = build_prompt(data, output_type, self.variant);
        let outcome = self.client.complete(&prompt).await;
        match &outcome {
            CompletionOutcome::Ok(text) => tracing::info!("Generated {} syntax: {}", self.variant.syntax_name(), text),
            CompletionOutcome::Degraded(reason) => tracing::warn!("Returning degraded result: {}", reason),
        }
        outcome
    }

    /// Summarize `text` with this pipeline's summarizer regardless of variant.
    pub async fn summarize(&self, text: &str) -> String {
        self.summarizer.summarize_or_marker(text).await
    }
}
