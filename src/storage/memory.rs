use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{NewUser, StoreError, User, UserStore};

#[derive(Default)]
struct Inner {
    users: HashMap<i32, User>,
    next_id: i32,
}

/// Process-lifetime map keyed by an auto-incrementing id starting at 1
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(user.username));
        }

        let id = inner.next_id;
        inner.next_id += 1;
        let created = User {
            id,
            username: user.username,
            password: user.password,
        };
        inner.users.insert(id, created.clone());
        Ok(created)
    }
}
