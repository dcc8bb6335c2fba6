//! Server configuration types for Parley.
//!
//! `ServerConfig` represents the optional `config.toml` in the data
//! directory. All fields have defaults, so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote inference service settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Endpoint receiving `{"inputs": {"prompt", "enable_search"}}`.
    #[serde(default = "default_inference_url")]
    pub url: String,

    #[serde(default = "default_enable_search")]
    pub enable_search: bool,

    /// Whole-request timeout for a single inference call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional bearer token for the inference endpoint.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_inference_url() -> String {
    "https://mirxakamran893-logiqcurvecode.hf.space/chat".to_string()
}

fn default_enable_search() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            url: default_inference_url(),
            enable_search: default_enable_search(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("url", &self.url)
            .field("enable_search", &self.enable_search)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Session lifetime and cookie settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: i64,

    /// Add the `Secure` attribute to the session cookie (set behind HTTPS).
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_ttl_hours() -> i64 {
    24 * 30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            cookie_secure: false,
        }
    }
}
