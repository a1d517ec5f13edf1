//! Google Gemini `generateContent` client
//!
//! This module provides the HTTP client used by the gateway to reach the
//! generative language REST API. One request per call: no retries and no
//! caching happen at this layer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use super::provider::{GenerateRequest, GenerativeModel, ProviderError};
use crate::TravelBuddyError;
use crate::config::AiConfig;

/// Gemini REST client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key sent with every request
    api_key: String,
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GenerateContentBody {
    fn from_request(request: &GenerateRequest) -> Self {
        let generation_config = if request.temperature.is_some() || request.expects_json() {
            Some(GenerationConfig {
                temperature: request.temperature,
                response_mime_type: request
                    .expects_json()
                    .then(|| "application/json".to_string()),
                response_schema: request.response_schema.clone(),
            })
        } else {
            None
        };

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            system_instruction: request.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: Some(text.clone()),
                }],
            }),
            generation_config,
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty when there is none.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    /// Create a new client; fails when no API key is configured
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TravelBuddyError::config("GOOGLE_API_KEY is required to talk to the AI service")
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TravelBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model, json = request.expects_json()))]
    async fn generate(&self, request: GenerateRequest) -> Result<String, ProviderError> {
        let start_time = Instant::now();
        let body = GenerateContentBody::from_request(&request);

        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Network error talking to Gemini: {}", e);
                ProviderError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            error!("Gemini request failed with {}: {}", status, message);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationFailed(message)
                }
                _ => ProviderError::Status {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let text = parsed.text();

        let total_duration = start_time.elapsed();
        info!(
            "Gemini responded with {} chars in {:.3}s",
            text.len(),
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 20 {
            warn!(
                "Slow provider response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(text)
    }
}
