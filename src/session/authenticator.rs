//! The credential-checking collaborator used by the session store

use async_trait::async_trait;

use crate::auth::{AuthResponse, AuthService, LoginRequest};
use crate::error::{Error, Result};

/// Something that can exchange credentials for a token and user.
///
/// Rejections are reported as `Ok(AuthResponse { success: false, .. })`;
/// `Err` is reserved for transport and server faults.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse>;
}

/// Calls the portal's login endpoint over HTTP
#[derive(Clone)]
pub struct HttpAuthenticator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthenticator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/api/auth/login", self.base_url)
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.login_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str::<AuthResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(Error::Other(format!(
                "Login endpoint returned {}",
                status
            ))),
            Err(e) => Err(Error::Json(e)),
        }
    }
}

/// Checks credentials in-process against an `AuthService`
#[derive(Clone)]
pub struct LocalAuthenticator {
    service: AuthService,
}

impl LocalAuthenticator {
    pub fn new(service: AuthService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse> {
        match self.service.login(email, password).await {
            Ok((token, user)) => Ok(AuthResponse::ok(token, user)),
            Err(e @ (Error::InvalidCredentials | Error::BadRequest(_))) => {
                Ok(AuthResponse::failure(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_trims_trailing_slash() {
        let auth = HttpAuthenticator::new("http://localhost:4780/");
        assert_eq!(auth.login_url(), "http://localhost:4780/api/auth/login");
    }
}
