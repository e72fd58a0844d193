use serde::Serialize;

use crate::error::{Result, RxError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the completion client.
#[derive(Clone, Serialize)]
pub struct CompletionConfig {
    #[serde(skip_serializing)]
    api_key: String,
    pub base_url: String,
    pub api_version: String,
    /// Model id, with or without the `models/` prefix.
    pub model: String,
    /// Request timeout. `None` waits for the provider indefinitely.
    pub timeout_secs: Option<u64>,
}

// Keep the key out of logs.
impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RxError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
        })
    }

    /// Read `GEMINI_API_KEY` plus the optional `GEMINI_MODEL`,
    /// `GEMINI_BASE_URL` and `GEMINI_TIMEOUT_SECS` overrides.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| RxError::MissingApiKey)?;
        let mut config = Self::new(api_key)?;

        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.is_empty() {
                config.model = model;
            }
        }

        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }

        if let Ok(timeout) = std::env::var("GEMINI_TIMEOUT_SECS") {
            config.timeout_secs = parse_timeout_secs(&timeout)?;
        }

        Ok(config)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout. `Some(0)` means no timeout.
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs.filter(|s| *s > 0);
        self
    }

    /// Model id without the `models/` resource prefix.
    pub fn model_id(&self) -> &str {
        self.model.strip_prefix("models/").unwrap_or(&self.model)
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model_id()
        )
    }
}

/// Parse a timeout setting. Blank and `0` both mean no timeout.
pub fn parse_timeout_secs(value: &str) -> Result<Option<u64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let secs = value
        .parse::<u64>()
        .map_err(|_| RxError::Config(format!("GEMINI_TIMEOUT_SECS is not a number: {value}")))?;
    Ok(Some(secs).filter(|s| *s > 0))
}
