//! Gemini client for the generative-language REST API.
//!
//! This crate provides:
//! - The [`GenerativeService`] trait, the single operation the recommender
//!   needs from a text-generation backend
//! - [`GeminiClient`], which implements it over HTTPS against
//!   `{base_url}/{model}:generateContent`
//! - Error mapping from HTTP status codes and Google's error envelope

use async_trait::async_trait;
use tracing::{debug, error, info};

pub mod error;
pub mod service;
pub mod types;

pub use error::GeminiClientError;
pub use service::GenerativeService;
use types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Public endpoint of the generative-language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";
const MODEL_PREFIX: &str = "models/";

/// Client for the Gemini `generateContent` endpoint.
///
/// Holds the API key and a pooled `reqwest::Client`. Requests carry no timeout
/// and are never retried: a call either returns text or an error.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GeminiClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GeminiClientError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint URL for `model`, accepting both `gemini-2.0-flash` and
    /// `models/gemini-2.0-flash`.
    pub fn endpoint(&self, model: &str) -> String {
        let model = model.trim_start_matches('/');
        if model.starts_with(MODEL_PREFIX) {
            format!("{}/{}:generateContent", self.base_url, model)
        } else {
            format!("{}/{}{}:generateContent", self.base_url, MODEL_PREFIX, model)
        }
    }

    /// Send `prompt` to `model` and return the generated text.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<String, GeminiClientError> {
        let url = self.endpoint(model);
        info!("Requesting content from {}", model);
        debug!("POST {} ({} prompt bytes)", url, prompt.len());

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                error!("Transport error while calling Gemini: {}", e);
                GeminiClientError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
                _ => body.trim().to_string(),
            };
            error!("Gemini returned {}: {}", status, message);
            return Err(GeminiClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode Gemini response: {}", e);
            GeminiClientError::InvalidResponse(e.to_string())
        })?;

        match parsed.text() {
            Some(text) => {
                debug!("Received {} bytes of generated text", text.len());
                Ok(text)
            }
            None => Err(GeminiClientError::EmptyResponse {
                block_reason: parsed.block_reason(),
            }),
        }
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiClientError> {
        self.generate_content(model, prompt).await
    }
}
