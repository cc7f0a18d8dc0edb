//! Authentication: users, passwords, tokens

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::{Claims, TokenService};
pub use middleware::{bearer_token, extract_claims, require_auth};
pub use models::{AuthResponse, LoginRequest, Role, StoredUser, User};
pub use password::PasswordHasher;
pub use service::AuthService;
