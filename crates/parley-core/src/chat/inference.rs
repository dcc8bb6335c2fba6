//! InferenceClient trait and prompt building.

use parley_types::chat::Message;
use parley_types::error::InferenceError;

/// A single prompt for the remote inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub prompt: String,
    pub enable_search: bool,
}

/// Remote text generation.
///
/// Implementations live in parley-infra (e.g., `HttpInferenceClient`).
pub trait InferenceClient: Send + Sync {
    /// Generate a reply for `request`.
    ///
    /// Non-success responses and replies without a text field are errors;
    /// implementations never substitute placeholder text.
    fn generate(
        &self,
        request: &InferenceRequest,
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;
}

/// Flatten a conversation into a single prompt: contents joined by newlines,
/// roles dropped.
pub fn build_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
