//! Generative-model provider seam
//!
//! Defines the single operation the gateway needs from an AI backend so the
//! real Gemini client and test doubles are interchangeable.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a provider call
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network failure, timeout, or unreadable body
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// Non-success HTTP status from the provider
    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// API key rejected or missing
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
    /// Response envelope did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A single completion request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
    /// When set the provider is asked for `application/json` matching this schema
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            temperature: None,
            response_schema: None,
        }
    }

    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    #[must_use]
    pub fn expects_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Text/JSON completion backend
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Returns the raw response text, which may be empty.
    async fn generate(&self, request: GenerateRequest) -> Result<String, ProviderError>;
}
