//! `facebook/bart-large-cnn` reached through a hosted inference endpoint.
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::summarizer::Summarize;

/// Fixed decoding parameters for the summarization pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummarizationSettings {
    pub num_beams: u32,
    pub length_penalty: f64,
    pub min_length: u32,
    pub max_length: u32,
    pub early_stopping: bool,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        SummarizationSettings {
            num_beams: 4,
            length_penalty: 2.0,
            min_length: 50,
            max_length: 200,
            early_stopping: true,
        }
    }
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters<'a>,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct SummarizationParameters<'a> {
    /// Cuts the input at the model's 1024-token limit.
    truncation: &'static str,
    generate_parameters: &'a SummarizationSettings,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

pub struct HostedSummarizer {
    client: Client,
    url: Url,
    token: Option<String>,
    settings: SummarizationSettings,
}

impl HostedSummarizer {
    pub fn load(url: &str, token: Option<String>) -> AppResult<Self> {
        let url = Url::parse(url).map_err(|e| AppError::Config(format!("summarizer url '{}': {}", url, e)))?;
        Ok(HostedSummarizer {
            client: Client::new(),
            url,
            token: token.filter(|t| !t.trim().is_empty()),
            settings: SummarizationSettings::default(),
        })
    }

    pub fn settings(&self) -> &SummarizationSettings {
        &self.settings
    }
}

#[async_trait]
impl Summarize for HostedSummarizer {
    async fn summarize(&self, text: &str) -> AppResult<String> {
        let body = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                truncation: "only_first",
                generate_parameters: &self.settings,
            },
            options: InferenceOptions { wait_for_model: true },
        };

        let mut request = self.client.post(self.url.clone()).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStatus { status: status.as_u16(), body });
        }

        let value: Value = response.json().await?;
        let summary = match serde_json::from_value::<Vec<SummaryItem>>(value.clone()) {
            Ok(items) => items.into_iter().next().map(|i| i.summary_text),
            Err(_) => None,
        };
        let summary = summary.ok_or_else(|| AppError::Summarizer(format!("unexpected response: {}", value)))?;

        tracing::info!("Summarized text: {}", summary);
        Ok(summary)
    }
}
