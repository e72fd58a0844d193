use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::{debug, warn};

use super::config::CompletionConfig;
use super::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use super::CompletionClient;
use crate::entity::{Completion, Prompt};
use crate::error::{Result, RxError};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Completion client for the Gemini `generateContent` API.
pub struct GeminiClient {
    config: CompletionConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(config.api_key())
            .map_err(|_| RxError::Config("API key contains invalid characters".to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| RxError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &Prompt) -> Result<Completion> {
        let model = self.config.model_id();
        debug!(model, prompt_len = prompt.as_str().len(), "Requesting completion");

        let request = GenerateContentRequest::from_text(prompt.as_str());
        let response = self
            .http_client
            .post(self.config.generate_content_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) if !err.error.status.is_empty() => {
                    format!("{}: {}", err.error.status, err.error.message)
                }
                Ok(err) => err.error.message,
                Err(_) => body,
            };
            return Err(RxError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        match body.text() {
            Some(text) => Ok(Completion::new(text).with_model(model)),
            None => {
                let reason = body
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .or_else(|| {
                        body.candidates
                            .and_then(|c| c.into_iter().next())
                            .and_then(|c| c.finish_reason)
                    });
                warn!(model, reason = ?reason, "Completion contained no text");
                Err(RxError::EmptyCompletion)
            }
        }
    }
}
