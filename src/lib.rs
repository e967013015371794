//! Chart syntax API library
//!
//! Modules:
//! - `api`: Axum HTTP handlers, wire models and router setup used by the binary.
//! - `completion`: Thin client for the Perplexity chat-completions endpoint.
//! - `prompt`: Per-variant prompt wording.
//! - `summarizer`: Hosted BART summarization for the Mermaid variant.
//! - `pipeline`: Summarize, prompt, complete.
//! - `variant`: ApexCharts / Chart.js / Mermaid differences in one place.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `CompletionClient`,
//! `Pipeline` and `Variant`.
pub mod api;
pub mod completion;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod summarizer;
pub mod variant;

#[cfg(test)]
mod test_support;

pub use completion::client::{CompletionClient, CompletionOutcome};
pub use config::Config;
pub use pipeline::{GenerationRequest, Pipeline};
pub use variant::Variant;
