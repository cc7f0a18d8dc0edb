//! PostgreSQL user repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::{Client, NoTls, Row};

use super::UserRepository;
use crate::auth::{StoredUser, User};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, house_number, role, created_at, password_hash";

/// Users stored in a `users` table
pub struct PostgresUserRepository {
    client: Client,
}

impl PostgresUserRepository {
    /// Connect and spawn the connection driver
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let (client, connection) =
            tokio_postgres::connect(&config.connection_string(), NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!(
            "Connected to PostgreSQL at {}:{}/{}",
            config.host,
            config.port,
            config.dbname
        );
        Ok(Self { client })
    }

    /// Create the users table if it does not exist
    pub async fn migrate(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    phone TEXT NOT NULL DEFAULT '',
                    house_number TEXT NOT NULL DEFAULT '',
                    role TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                    password_hash TEXT NOT NULL
                )",
            )
            .await?;
        tracing::debug!("users table ready");
        Ok(())
    }
}

fn row_to_user(row: &Row) -> Result<StoredUser> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(StoredUser {
        user: User {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            house_number: row.try_get("house_number")?,
            role: row.try_get("role")?,
            created_at,
        },
        password_hash: row.try_get("password_hash")?,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = self.client.query_opt(query.as_str(), &[&email]).await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredUser>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = self.client.query_opt(query.as_str(), &[&id]).await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert(&self, stored: StoredUser) -> Result<()> {
        let u = &stored.user;
        let inserted = self
            .client
            .execute(
                "INSERT INTO users (id, first_name, last_name, email, phone, house_number, role, created_at, password_hash)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 ON CONFLICT (email) DO NOTHING",
                &[
                    &u.id,
                    &u.first_name,
                    &u.last_name,
                    &u.email,
                    &u.phone,
                    &u.house_number,
                    &u.role,
                    &u.created_at,
                    &stored.password_hash,
                ],
            )
            .await?;

        if inserted == 0 {
            return Err(Error::UserAlreadyExists(u.email.clone()));
        }
        tracing::info!("Created user {} ({})", u.email, u.role);
        Ok(())
    }
}
