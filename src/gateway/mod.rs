//! AI gateway
//!
//! Turns place searches, chat messages and location lookups into provider
//! requests and decodes the answers into typed records. Every call goes to the
//! provider; nothing is retried or cached.

pub mod gemini;
pub mod prompts;
pub mod provider;
pub mod schema;

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::config::AiConfig;
use crate::models::{Category, ChatReply, LocationInfo, Place};

pub use gemini::GeminiClient;
pub use provider::{GenerateRequest, GenerativeModel, ProviderError};

/// Failures surfaced to the route layer. Details are logged, not carried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Failed to search places with AI")]
    PlacesUnavailable,
    #[error("Failed to get location information")]
    LocationUnavailable,
}

/// Stateless facade over a [`GenerativeModel`]
#[derive(Clone)]
pub struct TravelGateway {
    model: Arc<dyn GenerativeModel>,
    model_id: String,
    chat_temperature: f32,
}

impl TravelGateway {
    pub fn new(model: Arc<dyn GenerativeModel>, config: &AiConfig) -> Self {
        Self {
            model,
            model_id: config.model.clone(),
            chat_temperature: config.chat_temperature,
        }
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.model.provider_name()
    }

    /// Ask the provider for up to six real, currently operating places.
    #[instrument(skip(self))]
    pub async fn search_places(
        &self,
        location: &str,
        category: Category,
        query: Option<&str>,
    ) -> Result<Vec<Place>, GatewayError> {
        let request = GenerateRequest::new(
            &self.model_id,
            prompts::places_prompt(location, category, query),
        )
        .with_response_schema(prompts::places_schema());

        let text = self.model.generate(request).await.map_err(|e| {
            error!("Error searching places with AI: {}", e);
            GatewayError::PlacesUnavailable
        })?;

        let places = schema::decode_places(&text, category).map_err(|e| {
            error!("Error decoding places from AI: {}", e);
            GatewayError::PlacesUnavailable
        })?;

        info!("Found {} {} near '{}'", places.len(), category, location);
        Ok(places)
    }

    /// Travel Buddy reply. Provider failures turn into a fixed apology.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn chat(
        &self,
        message: &str,
        location: Option<&str>,
        context: Option<&str>,
    ) -> ChatReply {
        let request = GenerateRequest::new(&self.model_id, message)
            .with_system_instruction(prompts::chat_system_prompt(location, context))
            .with_temperature(self.chat_temperature);

        match self.model.generate(request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("Provider returned an empty chat reply");
                ChatReply {
                    text: prompts::CHAT_EMPTY_REPLY.to_string(),
                }
            }
            Ok(text) => ChatReply { text },
            Err(e) => {
                error!("Error in Travel Buddy chat: {}", e);
                ChatReply {
                    text: prompts::CHAT_FALLBACK.to_string(),
                }
            }
        }
    }

    /// Short description and approximate coordinates of a named place.
    #[instrument(skip(self))]
    pub async fn location_info(&self, name: &str) -> Result<LocationInfo, GatewayError> {
        let request = GenerateRequest::new(&self.model_id, prompts::location_prompt(name))
            .with_response_schema(prompts::location_schema());

        let text = self.model.generate(request).await.map_err(|e| {
            error!("Error getting location info: {}", e);
            GatewayError::LocationUnavailable
        })?;

        Ok(schema::decode_location_info(&text))
    }
}
