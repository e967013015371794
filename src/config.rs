//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for everything except the API key,
//! whose absence is reported by the completion client at request time.
use std::env;

use crate::variant::Variant;

pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_SUMMARIZER_URL: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn";
pub const DEFAULT_PORT: u16 = 8000;
pub const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";

#[derive(Clone, Debug)]
pub struct Config {
    pub perplexity_api_key: Option<String>,
    pub perplexity_url: String,
    pub summarizer_url: String,
    pub hf_api_token: Option<String>,
    pub api_host: String,
    pub port: u16,
    pub variant: Variant,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Empty values count as unset. An unparsable `PORT` falls back to 8000
    /// with a warning; an unknown `VARIANT` is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', falling back to {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let variant = match get("VARIANT") {
            Some(raw) => raw.parse()?,
            None => Variant::Apex,
        };

        Ok(Config {
            perplexity_api_key: get(API_KEY_VAR),
            perplexity_url: get("PERPLEXITY_API_URL").unwrap_or_else(|| DEFAULT_COMPLETIONS_URL.to_string()),
            summarizer_url: get("SUMMARIZER_URL").unwrap_or_else(|| DEFAULT_SUMMARIZER_URL.to_string()),
            hf_api_token: get("HF_API_TOKEN"),
            api_host: get("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            variant,
        })
    }

    pub fn print_env_vars(&self) {
        tracing::info!("{}: {}", API_KEY_VAR, mask(self.perplexity_api_key.as_deref()));
        tracing::info!("PERPLEXITY_API_URL: {}", self.perplexity_url);
        tracing::info!("SUMMARIZER_URL: {}", self.summarizer_url);
        tracing::info!("HF_API_TOKEN: {}", mask(self.hf_api_token.as_deref()));
        tracing::info!("API_HOST: {}", self.api_host);
        tracing::info!("PORT: {}", self.port);
        tracing::info!("VARIANT: {}", self.variant);
    }
}

fn mask(secret: Option<&str>) -> String {
    match secret {
        Some(s) if s.chars().count() > 4 => {
            let tail: String = s.chars().skip(s.chars().count() - 4).collect();
            format!("****{}", tail)
        }
        Some(_) => "****".to_string(),
        None => "<unset>".to_string(),
    }
}
