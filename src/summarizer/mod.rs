//! Abstractive summarization used by the Mermaid variant.
//!
//! The model itself is an external collaborator. `Summarize` is the seam; the
//! shipped backend is [`hosted::HostedSummarizer`], and [`SharedSummarizer`]
//! makes sure it is built once per process and then only read.
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::{AppError, AppResult};

pub mod hosted;

pub use hosted::{HostedSummarizer, SummarizationSettings};

#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, text: &str) -> AppResult<String>;
}

/// Lazily loaded, read-only summarizer shared by every request.
pub struct SharedSummarizer {
    cell: OnceCell<Arc<dyn Summarize>>,
    url: String,
    token: Option<String>,
}

impl SharedSummarizer {
    /// A cell that loads the hosted backend on first use.
    pub fn hosted(url: String, token: Option<String>) -> Self {
        SharedSummarizer { cell: OnceCell::new(), url, token }
    }

    /// A cell that already holds `summarizer`.
    pub fn preloaded(summarizer: Arc<dyn Summarize>) -> Self {
        SharedSummarizer {
            cell: OnceCell::new_with(Some(summarizer)),
            url: String::new(),
            token: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Load the backend if nobody has yet. Concurrent callers wait on the same
    /// initialization; a failed load leaves the cell empty for the next try.
    pub async fn get(&self) -> AppResult<&Arc<dyn Summarize>> {
        self.cell
            .get_or_try_init(|| async {
                tracing::info!("Loading summarizer backend from {}", self.url);
                let loaded = HostedSummarizer::load(&self.url, self.token.clone())?;
                Ok::<_, AppError>(Arc::new(loaded) as Arc<dyn Summarize>)
            })
            .await
    }

    /// Summarize `text`, turning any failure into an `Error: ...` marker.
    pub async fn summarize_or_marker(&self, text: &str) -> String {
        let result = match self.get().await {
            Ok(summarizer) => summarizer.summarize(text).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Summarization failed: {}", e);
                format!("Error: Summarization failed - {}", e)
            }
        }
    }
}
