//! User store
//!
//! Two interchangeable backends behind [`UserStore`]: an in-memory map and a
//! PostgreSQL table. The backend is chosen once at start-up from the presence
//! of a database URL.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::TravelBuddyError;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Username already taken: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    fn backend_name(&self) -> &'static str;
    async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Postgres when a URL is configured, otherwise the in-memory map.
pub async fn open(database_url: Option<&str>) -> anyhow::Result<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match database_url {
        Some(url) => Arc::new(
            PgUserStore::connect(url)
                .await
                .map_err(|e| TravelBuddyError::storage(e.to_string()))?,
        ),
        None => Arc::new(MemoryUserStore::new()),
    };
    info!("User store backend: {}", store.backend_name());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_without_url_uses_memory() {
        let store = open(None).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
