use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    gateway::TravelGateway,
    models::{Category, ChatReply, ChatRequest, LocationInfo, Place},
    storage::UserStore,
};

/// Dependencies handed to every handler. Built once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<TravelGateway>,
    /// Constructed at start-up; no route reads or writes users yet.
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(gateway: TravelGateway, users: Arc<dyn UserStore>) -> Self {
        Self {
            gateway: Arc::new(gateway),
            users,
        }
    }
}

/// JSON error body `{"error": "..."}` with a status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacesParams {
    pub location: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/places", get(get_places))
        .route("/chat", post(post_chat))
        .route("/location/{name}", get(get_location))
        .route("/health", get(get_health))
        .with_state(state)
}

async fn get_places(
    State(state): State<AppState>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let (Some(location), Some(category)) = (
        present(params.location.as_deref()),
        present(params.category.as_deref()),
    ) else {
        return Err(ApiError::bad_request("Location and category are required"));
    };

    let category: Category = category
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Unknown category: {category}")))?;

    let places = state
        .gateway
        .search_places(location, category, present(params.query.as_deref()))
        .await
        .map_err(|e| {
            tracing::error!("Error fetching places: {}", e);
            ApiError::internal("Failed to fetch places")
        })?;

    Ok(Json(places))
}

async fn post_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    // A missing, mistyped or unparseable body is treated as having no message.
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected chat body: {}", rejection.body_text());
            ChatRequest::default()
        }
    };

    let Some(message) = present(request.message.as_deref()) else {
        return Err(ApiError::bad_request("Message is required"));
    };

    let reply = state
        .gateway
        .chat(
            message,
            request.location.as_deref(),
            request.context.as_deref(),
        )
        .await;

    Ok(Json(reply))
}

async fn get_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LocationInfo>, ApiError> {
    let info = state.gateway.location_info(&name).await.map_err(|e| {
        tracing::error!("Error getting location info: {}", e);
        ApiError::internal("Failed to get location information")
    })?;
    Ok(Json(info))
}

async fn get_health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: crate::VERSION,
    })
}
