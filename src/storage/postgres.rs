//! PostgreSQL-backed user store

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

use super::{NewUser, StoreError, User, UserStore};

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
)";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Connect and make sure the `users` table exists.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await?;

        sqlx::query(CREATE_USERS_TABLE).execute(&pool).await?;
        info!("Connected to user database");

        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    /// Query failures are logged and reported as "no such user".
    async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        Ok(row.unwrap_or_else(|e| {
            error!("Error getting user: {}", e);
            None
        }))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1 LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;

        Ok(row.unwrap_or_else(|e| {
            error!("Error getting user by username: {}", e);
            None
        }))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id, username, password",
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return StoreError::Conflict(user.username.clone());
                }
            }
            error!("Error creating user: {}", e);
            StoreError::Database(e)
        })
    }
}
