//! Data models for the Travel Buddy application
//!
//! This module contains the core domain models organized by concern:
//! - Place: AI-recommended places and their categories
//! - Location: coordinates and location summaries
//! - Chat: chat payloads and client-side messages

pub mod chat;
pub mod location;
pub mod place;

// Re-export all public types for convenient access
pub use chat::{ChatMessage, ChatReply, ChatRequest, Role};
pub use location::{Coordinates, LocationInfo};
pub use place::{Category, Place};
