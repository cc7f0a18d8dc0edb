//! Session snapshot and its persisted shapes

use serde::{Deserialize, Serialize};

use crate::auth::{Role, User};

/// Identity held by an authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    user: User,
    token: String,
    role: Role,
}

impl Authenticated {
    /// Build from a login result. Returns `None` when the token is empty,
    /// which would otherwise describe a session that is authenticated without
    /// credentials.
    pub fn new(user: User, token: String) -> Option<Self> {
        if token.trim().is_empty() {
            return None;
        }
        let role = user.role();
        Some(Self { user, token, role })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// The client-held record of who is signed in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    auth: Option<Authenticated>,
    remember_me: bool,
}

impl Session {
    /// An unauthenticated session
    pub fn anonymous(remember_me: bool) -> Self {
        Self {
            auth: None,
            remember_me,
        }
    }

    pub fn authenticated(auth: Authenticated, remember_me: bool) -> Self {
        Self {
            auth: Some(auth),
            remember_me,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.as_ref().map(Authenticated::user)
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(Authenticated::token)
    }

    /// Role of the signed-in user, `None` when anonymous
    pub fn role(&self) -> Option<Role> {
        self.auth.as_ref().map(Authenticated::role)
    }

    /// Role string exactly as the backend sent it
    pub fn role_str(&self) -> Option<&str> {
        self.user().map(|u| u.role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(|r| r.is_admin())
    }

    pub fn is_guard(&self) -> bool {
        self.role().is_some_and(|r| r.is_guard())
    }

    pub fn is_maintenance(&self) -> bool {
        self.role().is_some_and(|r| r.is_maintenance())
    }

    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    pub(crate) fn set_remember_me(&mut self, remember_me: bool) {
        self.remember_me = remember_me;
    }

    /// Identity and raw role string, used to detect when access decisions
    /// must be re-run
    pub fn fingerprint(&self) -> SessionFingerprint {
        SessionFingerprint {
            user_id: self.user().map(|u| u.id.clone()),
            role: self.role_str().map(str::to_string),
        }
    }

    /// The shape written to client storage for this session
    pub fn to_persisted(&self) -> PersistedSession {
        match &self.auth {
            Some(auth) if self.remember_me => PersistedSession::Full {
                user: auth.user.clone(),
                token: auth.token.clone(),
                remember_me: true,
            },
            _ => PersistedSession::FlagOnly {
                remember_me: self.remember_me,
            },
        }
    }

    /// Rebuild a session from its stored shape
    pub fn from_persisted(persisted: PersistedSession) -> Self {
        match persisted {
            PersistedSession::Full {
                user,
                token,
                remember_me,
            } => match Authenticated::new(user, token) {
                Some(auth) => Self::authenticated(auth, remember_me),
                None => {
                    tracing::warn!("Stored session has no token, starting signed out");
                    Self::anonymous(remember_me)
                }
            },
            PersistedSession::FlagOnly { remember_me } => Self::anonymous(remember_me),
        }
    }
}

/// Comparable summary of a session's identity
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionFingerprint {
    pub user_id: Option<String>,
    /// Role as sent by the backend; two strings parsing to the same `Role`
    /// still differ for exact role requirements
    pub role: Option<String>,
}

/// What survives a restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersistedSession {
    /// Complete identity, kept only when the user asked to be remembered
    Full {
        user: User,
        token: String,
        remember_me: bool,
    },
    /// Just the opt-in choice
    FlagOnly { remember_me: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(role: &str) -> Authenticated {
        Authenticated::new(
            User::new("Ana", "Pérez", "ana@example.com", role),
            "tok".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let user = User::new("Ana", "Pérez", "ana@example.com", "residente");
        assert!(Authenticated::new(user.clone(), String::new()).is_none());
        assert!(Authenticated::new(user, "   ".to_string()).is_none());
    }

    #[test]
    fn test_anonymous_has_no_flags() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!session.is_admin() && !session.is_guard() && !session.is_maintenance());
    }

    #[test]
    fn test_flags_follow_role() {
        let session = Session::authenticated(auth("mantenimiento"), false);
        assert!(session.is_maintenance());
        assert!(!session.is_admin());
        assert!(!session.is_guard());
    }

    #[test]
    fn test_persisted_shape_depends_on_remember_me() {
        let remembered = Session::authenticated(auth("residente"), true);
        assert!(matches!(
            remembered.to_persisted(),
            PersistedSession::Full { .. }
        ));

        let forgotten = Session::authenticated(auth("residente"), false);
        assert_eq!(
            forgotten.to_persisted(),
            PersistedSession::FlagOnly { remember_me: false }
        );
    }

    #[test]
    fn test_persisted_json_shapes() {
        let flag = serde_json::to_value(PersistedSession::FlagOnly { remember_me: false }).unwrap();
        assert_eq!(flag, serde_json::json!({"kind": "flag_only", "remember_me": false}));

        let full = Session::authenticated(auth("vigilante"), true).to_persisted();
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["kind"], "full");
        assert_eq!(json["token"], "tok");
        assert_eq!(json["user"]["role"], "vigilante");
    }

    #[test]
    fn test_full_shape_round_trips_to_same_session() {
        let session = Session::authenticated(auth("administrador"), true);
        let restored = Session::from_persisted(session.to_persisted());
        assert_eq!(restored, session);
    }

    #[test]
    fn test_fingerprint_tracks_raw_role_string() {
        let first = auth("inquilino");
        let mut user = first.user().clone();
        user.role = "residente".to_string();
        let second = Authenticated::new(user, "tok".to_string()).unwrap();

        // Both parse to Resident but are different role strings
        assert_eq!(first.role(), second.role());
        assert_ne!(
            Session::authenticated(first, false).fingerprint(),
            Session::authenticated(second, false).fingerprint()
        );
    }
}
