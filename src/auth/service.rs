//! Credential checking and token issuance

use std::sync::Arc;

use crate::auth::jwt::{Claims, TokenService};
use crate::auth::models::User;
use crate::auth::password::PasswordHasher;
use crate::config::AuthConfig;
use crate::db::UserRepository;
use crate::error::{Error, Result};

/// Verifies credentials against the user repository and signs tokens
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService, hasher: PasswordHasher) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    pub fn from_config(users: Arc<dyn UserRepository>, config: &AuthConfig) -> Self {
        Self::new(
            users,
            TokenService::from_config(config),
            PasswordHasher::new(config.bcrypt_cost),
        )
    }

    /// Check the credentials and issue a token for the matching user.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let Some(stored) = self.users.find_by_email(email).await? else {
            tracing::info!("Login rejected for unknown email {}", email);
            return Err(Error::InvalidCredentials);
        };

        if !self.hasher.verify(password, &stored.password_hash) {
            tracing::info!("Login rejected for {}: wrong password", email);
            return Err(Error::InvalidCredentials);
        }

        let token = self.tokens.create_token(&stored.user)?;
        tracing::info!("User {} logged in as {}", stored.user.id, stored.user.role);
        Ok((token, stored.user))
    }

    /// Resolve a bearer token to its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.tokens
            .validate_token(token)
            .map_err(|e| Error::Unauthorized(e.to_string()))
    }

    /// Resolve a bearer token to the current user record
    pub async fn current_user(&self, token: &str) -> Result<User> {
        let claims = self.verify_token(token)?;
        self.user_for_claims(&claims).await
    }

    /// The user a verified token was issued to. A deleted user's token no
    /// longer authorizes anything.
    pub async fn user_for_claims(&self, claims: &Claims) -> Result<User> {
        self.users
            .find_by_id(&claims.sub)
            .await?
            .map(|stored| stored.user)
            .ok_or_else(|| Error::Unauthorized("user no longer exists".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::StoredUser;
    use crate::db::InMemoryUserRepository;

    async fn service_with_user(email: &str, password: &str, role: &str) -> AuthService {
        let hasher = PasswordHasher::new(4);
        let repo = InMemoryUserRepository::new();
        repo.insert(StoredUser {
            user: User::new("Ana", "Pérez", email, role),
            password_hash: hasher.hash(password).unwrap(),
        })
        .await
        .unwrap();
        AuthService::new(Arc::new(repo), TokenService::new("secret", 3600), hasher)
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let service = service_with_user("ana@example.com", "clave", "administrador").await;
        let (token, user) = service.login("ana@example.com", "clave").await.unwrap();

        assert_eq!(user.email, "ana@example.com");
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, "administrador");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service_with_user("ana@example.com", "clave", "residente").await;
        let result = service.login("ana@example.com", "otra").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let service = service_with_user("ana@example.com", "clave", "residente").await;
        let result = service.login("nadie@example.com", "clave").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_current_user_from_token() {
        let service = service_with_user("ana@example.com", "clave", "vigilante").await;
        let (token, user) = service.login("ana@example.com", "clave").await.unwrap();
        let current = service.current_user(&token).await.unwrap();
        assert_eq!(current, user);
        assert!(service.current_user("garbage").await.is_err());
    }

    #[tokio::test]
    async fn test_claims_for_missing_user_are_unauthorized() {
        let service = service_with_user("ana@example.com", "clave", "residente").await;
        let ghost = User::new("Ex", "Vecino", "ex@example.com", "residente");
        let claims = Claims::from_user(&ghost, 3600);

        let result = service.user_for_claims(&claims).await;
        assert!(matches!(result, Err(Error::Unauthorized(_))));
    }
}
