//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access tier of a portal user
///
/// The backend exchanges roles as one of four exact, case-sensitive strings.
/// Anything unrecognised is treated as a resident, so no elevated tier can be
/// reached by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Household member - the implicit tier when no other role matches
    #[default]
    Resident,
    /// Community administration - full access to the admin section
    Administrator,
    /// Visitor checkpoint staff
    Guard,
    /// Maintenance staff
    Maintenance,
}

impl Role {
    pub const RESIDENT: &'static str = "residente";
    pub const ADMINISTRATOR: &'static str = "administrador";
    pub const GUARD: &'static str = "vigilante";
    pub const MAINTENANCE: &'static str = "mantenimiento";

    /// Map a backend role string to a role by exact match
    pub fn from_role_str(role: &str) -> Self {
        match role {
            Self::ADMINISTRATOR => Role::Administrator,
            Self::GUARD => Role::Guard,
            Self::MAINTENANCE => Role::Maintenance,
            _ => Role::Resident,
        }
    }

    /// The backend string for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Resident => Self::RESIDENT,
            Role::Administrator => Self::ADMINISTRATOR,
            Role::Guard => Self::GUARD,
            Role::Maintenance => Self::MAINTENANCE,
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Administrator
    }

    pub fn is_guard(&self) -> bool {
        *self == Role::Guard
    }

    pub fn is_maintenance(&self) -> bool {
        *self == Role::Maintenance
    }

    pub fn is_resident(&self) -> bool {
        *self == Role::Resident
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User information as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// House or unit label within the community
    #[serde(default)]
    pub house_number: String,
    /// Role string exactly as the backend sent it
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: String::new(),
            house_number: String::new(),
            role: role.into(),
            created_at: Utc::now(),
        }
    }

    /// Role derived from the backend role string
    pub fn role(&self) -> Role {
        Role::from_role_str(&self.role)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A user record together with its password hash
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body returned by the login endpoint
///
/// `{success: true, token, user}` on success, `{success: false, message}` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn ok(token: String, user: User) -> Self {
        Self {
            success: true,
            token: Some(token),
            user: Some(user),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            token: None,
            user: None,
            message: Some(message.into()),
        }
    }
}
