//! User persistence

mod memory;
mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::StoredUser;
use crate::config::Config;
use crate::error::Result;

/// Lookup and creation of user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>>;

    /// Find a user by identifier
    async fn find_by_id(&self, id: &str) -> Result<Option<StoredUser>>;

    /// Insert a new user; fails if the email is taken
    async fn insert(&self, user: StoredUser) -> Result<()>;
}

/// Open the repository the config asks for: PostgreSQL when `[database]` is
/// present, otherwise an in-memory set seeded from `[[users]]`.
pub async fn connect(config: &Config) -> Result<Arc<dyn UserRepository>> {
    match &config.database {
        Some(db) => {
            let repo = PostgresUserRepository::connect(db).await?;
            repo.migrate().await?;
            Ok(Arc::new(repo))
        }
        None => {
            tracing::info!(
                "No database configured, serving {} user(s) from config",
                config.users.len()
            );
            Ok(Arc::new(InMemoryUserRepository::from_seed(&config.users)))
        }
    }
}
