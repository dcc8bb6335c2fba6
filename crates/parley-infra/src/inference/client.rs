//! reqwest-based inference client.

use std::time::Duration;

use parley_core::chat::inference::{InferenceClient, InferenceRequest};
use parley_types::config::InferenceConfig;
use parley_types::error::InferenceError;
use secrecy::{ExposeSecret, SecretString};

use super::types::{GenerateInputs, GenerateRequest, GenerateResponse};

/// Inference provider reached over plain HTTP POST.
///
/// The optional API key is held as a [`SecretString`] and only exposed when
/// building the `Authorization` header.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<SecretString>,
}

impl HttpInferenceClient {
    /// Build a client from configuration. The timeout covers the whole
    /// request including reading the body.
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone().map(SecretString::from),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl InferenceClient for HttpInferenceClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            inputs: GenerateInputs {
                prompt: &request.prompt,
                enable_search: request.enable_search,
            },
        };

        tracing::debug!(
            url = %self.url,
            prompt_len = request.prompt.len(),
            enable_search = request.enable_search,
            "inference request"
        );

        let mut builder = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Transport(format!("request timed out: {e}"))
            } else {
                InferenceError::Transport(format!("HTTP request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, url = %self.url, "inference error response");
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::MalformedResponse(format!("invalid JSON body: {e}")))?;

        match parsed.message {
            Some(serde_json::Value::String(text)) => Ok(text),
            Some(other) => Err(InferenceError::MalformedResponse(format!(
                "`message` is not a string: {other}"
            ))),
            None => Err(InferenceError::MalformedResponse(
                "response has no `message` field".to_string(),
            )),
        }
    }
}
