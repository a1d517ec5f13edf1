//! Travel Buddy - AI-powered place discovery and travel chat
//!
//! This library provides the AI gateway, the HTTP routes in front of it,
//! the user store and the client-side state the web front-end is built on.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod storage;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use client::{ApiClient, ChatPanel, DiscoverySession, PlaceCard, TravelApi};
pub use config::TravelBuddyConfig;
pub use error::TravelBuddyError;
pub use gateway::{GeminiClient, GenerativeModel, TravelGateway};
pub use models::{Category, ChatReply, ChatRequest, Coordinates, LocationInfo, Place};
pub use storage::UserStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelBuddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
