//! Perplexity chat-completion client and its wire types.
pub mod client;
pub mod payload;

pub use client::{CompletionClient, CompletionOutcome};
pub use payload::{ChatMessage, CompletionPayload};
