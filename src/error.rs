//! Common error type and alias.
//!
//! These never reach an HTTP client directly: the completion client and the
//! summarizer render them into `Error: ...` strings at their boundary.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("{status} - {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("{0} not set in environment variables")]
    MissingCredential(&'static str),
    #[error("{0}")]
    Summarizer(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
