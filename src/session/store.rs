//! The session store: the single place the session is mutated

use std::sync::Arc;

use super::authenticator::Authenticator;
use super::state::{Authenticated, Session};
use super::storage::SessionStorage;
use crate::auth::{AuthResponse, User};

/// Result of a login attempt. Failures carry a message meant for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(User),
    Failure { message: String },
}

impl LoginOutcome {
    fn failure(message: impl Into<String>) -> Self {
        LoginOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoginOutcome::Success(_) => None,
            LoginOutcome::Failure { message } => Some(message),
        }
    }
}

/// Owns the current session and mirrors it to storage.
///
/// Guards, the redirect supervisor and the layout selector receive
/// `&Session` snapshots from here; nothing else mutates the session.
pub struct SessionStore {
    session: Session,
    authenticator: Arc<dyn Authenticator>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// A signed-out store that has not looked at storage
    pub fn new(authenticator: Arc<dyn Authenticator>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            session: Session::default(),
            authenticator,
            storage,
        }
    }

    /// Rehydrate from storage, as on a browser restart.
    ///
    /// An unreadable copy is left where it is and the store starts signed
    /// out; `reset_store` is the way to purge it.
    pub fn restore(authenticator: Arc<dyn Authenticator>, storage: Arc<dyn SessionStorage>) -> Self {
        let session = match storage.load() {
            Ok(Some(persisted)) => Session::from_persisted(persisted),
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!("Ignoring stored session: {}", e);
                Session::default()
            }
        };

        Self {
            session,
            authenticator,
            storage,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn remember_me(&self) -> bool {
        self.session.remember_me()
    }

    /// Exchange credentials for a session. Never fails with an error: every
    /// problem comes back as `LoginOutcome::Failure` and leaves the session
    /// untouched.
    pub async fn login(&mut self, email: &str, password: &str) -> LoginOutcome {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return LoginOutcome::failure("Email and password are required");
        }
        if !email.contains('@') {
            return LoginOutcome::failure("Invalid email address");
        }

        let response = match self.authenticator.authenticate(email, password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Login request for {} failed: {}", email, e);
                return LoginOutcome::failure(format!(
                    "Could not reach the authentication service: {}",
                    e
                ));
            }
        };

        let auth = match response {
            AuthResponse {
                success: true,
                token: Some(token),
                user: Some(user),
                ..
            } => Authenticated::new(user, token),
            AuthResponse { success: true, .. } => None,
            AuthResponse { message, .. } => {
                let message = message.unwrap_or_else(|| "Login failed".to_string());
                tracing::info!("Login rejected for {}: {}", email, message);
                return LoginOutcome::failure(message);
            }
        };

        let Some(auth) = auth else {
            tracing::warn!("Authentication service sent a success without token or user");
            return LoginOutcome::failure("Malformed authentication response");
        };

        let user = auth.user().clone();
        self.session = Session::authenticated(auth, self.session.remember_me());
        tracing::info!("Signed in as {} ({})", user.email, user.role);
        self.persist();

        LoginOutcome::Success(user)
    }

    /// Sign out. The remember-me choice survives; identity does not.
    pub fn logout(&mut self) {
        if self.session.is_authenticated() {
            tracing::info!("Signed out");
        }
        self.session = Session::anonymous(self.session.remember_me());
        self.persist();
    }

    /// Change the opt-in for the next login. Does not touch storage.
    pub fn set_remember_me(&mut self, remember_me: bool) {
        self.session.set_remember_me(remember_me);
    }

    /// Sign out and purge the persisted copy, used when storage is suspect
    pub fn reset_store(&mut self) {
        self.session = Session::default();
        if let Err(e) = self.storage.clear() {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
        tracing::info!("Session store reset");
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.session.to_persisted()) {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }
}
