//! JWT token handling

use crate::auth::models::{Role, User};
use crate::config::AuthConfig;
use crate::error::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// Backend role string
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims from user, valid for `ttl_secs`
    pub fn from_user(user: &User, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// Get user role
    pub fn get_role(&self) -> Role {
        Role::from_role_str(&self.role)
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Issues and validates HS256 tokens with the configured secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    /// Create a JWT token
    pub fn create_token(&self, user: &User) -> Result<String> {
        let claims = Claims::from_user(user, self.ttl_secs);
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 3600)
    }

    #[test]
    fn test_create_and_validate_token() {
        let user = User::new("Ana", "Pérez", "ana@example.com", "administrador");
        let token = service().create_token(&user).expect("Failed to create token");
        let claims = service()
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.role, "administrador");
        assert_eq!(claims.get_role(), Role::Administrator);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        let result = service().validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let user = User::new("Luis", "Gómez", "luis@example.com", "vigilante");
        let token = TokenService::new("other-secret", 3600)
            .create_token(&user)
            .unwrap();
        assert!(service().validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let user = User::new("Luis", "Gómez", "luis@example.com", "vigilante");
        // Well past the default validation leeway
        let token = TokenService::new("test-secret", -600)
            .create_token(&user)
            .unwrap();
        assert!(service().validate_token(&token).is_err());
    }
}
