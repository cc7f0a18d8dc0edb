//! In-memory user repository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::auth::{StoredUser, User};
use crate::config::SeedUser;
use crate::error::{Error, Result};

/// Users keyed by id, shared between clones
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from users declared in the config file
    pub fn from_seed(seed: &[SeedUser]) -> Self {
        let users = seed
            .iter()
            .map(|s| {
                let mut user = User::new(&s.first_name, &s.last_name, &s.email, &s.role);
                user.phone = s.phone.clone();
                user.house_number = s.house_number.clone();
                let stored = StoredUser {
                    user,
                    password_hash: s.password_hash.clone(),
                };
                (stored.user.id.clone(), stored)
            })
            .collect();

        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredUser>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, user: StoredUser) -> Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.user.email == user.user.email) {
            return Err(Error::UserAlreadyExists(user.user.email));
        }
        users.insert(user.user.id.clone(), user);
        Ok(())
    }
}
