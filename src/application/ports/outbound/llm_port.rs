//! Structured text generation port

use async_trait::async_trait;

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub prompt: String,
    /// JSON schema the response text must conform to
    pub response_schema: Option<serde_json::Value>,
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
            temperature: None,
        }
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    /// Raw text of the first candidate
    pub content: String,
    pub model: String,
}

/// A remote text generator
///
/// Output is non-deterministic: the same request may yield different content.
#[async_trait]
pub trait LlmPort: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, Self::Error>;
}
