//! Client application
//!
//! Everything the Travel Buddy front-end needs apart from rendering pixels:
//! a typed client for the `/api` routes, the page state machine with its
//! places cache, chat-panel state and place-card view models.

pub mod cache;
pub mod chat;
pub mod session;
pub mod view;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::TravelBuddyError;
use crate::gateway::TravelGateway;
use crate::models::{Category, ChatReply, ChatRequest, LocationInfo, Place};

pub use chat::ChatPanel;
pub use session::DiscoverySession;
pub use view::PlaceCard;

/// The three backend operations the front-end calls
#[async_trait]
pub trait TravelApi: Send + Sync {
    async fn search_places(
        &self,
        location: &str,
        category: Category,
        query: Option<&str>,
    ) -> Result<Vec<Place>>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    async fn location_info(&self, name: &str) -> Result<LocationInfo>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for a running Travel Buddy server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("TravelBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Turn non-success statuses into errors carrying the server's message
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());

        Err(TravelBuddyError::general(format!("HTTP {}: {}", status.as_u16(), message)).into())
    }
}

#[async_trait]
impl TravelApi for ApiClient {
    #[instrument(skip(self))]
    async fn search_places(
        &self,
        location: &str,
        category: Category,
        query: Option<&str>,
    ) -> Result<Vec<Place>> {
        let mut params = vec![("location", location), ("category", category.as_str())];
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            params.push(("query", query));
        }

        let response = self
            .client
            .get(self.url("/places"))
            .query(&params)
            .send()
            .await
            .with_context(|| "Failed to fetch places")?;

        let places: Vec<Place> = Self::check(response)
            .await?
            .json()
            .await
            .with_context(|| "Failed to parse places response")?;
        debug!("Received {} places", places.len());
        Ok(places)
    }

    #[instrument(skip(self, request))]
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self
            .client
            .post(self.url("/chat"))
            .json(request)
            .send()
            .await
            .with_context(|| "Failed to send message")?;

        Self::check(response)
            .await?
            .json()
            .await
            .with_context(|| "Failed to parse chat response")
    }

    #[instrument(skip(self))]
    async fn location_info(&self, name: &str) -> Result<LocationInfo> {
        let url = self.url(&format!("/location/{}", urlencoding::encode(name)));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| "Failed to fetch location info")?;

        Self::check(response)
            .await?
            .json()
            .await
            .with_context(|| "Failed to parse location response")
    }
}

/// In-process backend: the gateway called directly, no server in between
#[async_trait]
impl TravelApi for TravelGateway {
    async fn search_places(
        &self,
        location: &str,
        category: Category,
        query: Option<&str>,
    ) -> Result<Vec<Place>> {
        TravelGateway::search_places(self, location, category, query)
            .await
            .map_err(|e| TravelBuddyError::provider(e.to_string()).into())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let message = request
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| TravelBuddyError::validation("Message is required"))?;

        Ok(TravelGateway::chat(
            self,
            message,
            request.location.as_deref(),
            request.context.as_deref(),
        )
        .await)
    }

    async fn location_info(&self, name: &str) -> Result<LocationInfo> {
        TravelGateway::location_info(self, name)
            .await
            .map_err(|e| TravelBuddyError::provider(e.to_string()).into())
    }
}
