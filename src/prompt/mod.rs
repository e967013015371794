//! Prompt rendering for the completion API.
pub mod builder;
