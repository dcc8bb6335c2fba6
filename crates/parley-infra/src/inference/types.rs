//! Wire types for the inference endpoint.

use serde::{Deserialize, Serialize};

/// Request body: the prompt wrapped in an `inputs` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub inputs: GenerateInputs<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateInputs<'a> {
    pub prompt: &'a str,
    pub enable_search: bool,
}

/// Response body. `message` is kept as a raw JSON value so a non-string
/// reply can be told apart from a missing one.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}
