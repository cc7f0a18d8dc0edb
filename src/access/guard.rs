//! Per-page authorization

use serde::{Deserialize, Serialize};

use super::routes::RoutePaths;
use crate::session::{Session, SessionFingerprint};

/// Requirements a page declares
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub require_auth: bool,
    #[serde(default)]
    pub require_admin: bool,
    #[serde(default)]
    pub require_guard: bool,
    #[serde(default)]
    pub require_maintenance: bool,
    /// Exact backend role string the user must hold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_role: Option<String>,
}

impl GuardConfig {
    /// No requirements
    pub fn open() -> Self {
        Self::default()
    }

    pub fn authenticated() -> Self {
        Self {
            require_auth: true,
            ..Self::default()
        }
    }

    pub fn with_admin(mut self) -> Self {
        self.require_admin = true;
        self
    }

    pub fn with_guard(mut self) -> Self {
        self.require_guard = true;
        self
    }

    pub fn with_maintenance(mut self) -> Self {
        self.require_maintenance = true;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.require_role = Some(role.into());
        self
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(String),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Access::Granted => None,
            Access::Redirect(target) => Some(target),
        }
    }
}

/// Check `session` against `config` for `path`. The first unmet requirement
/// decides the redirect.
pub fn evaluate(config: &GuardConfig, session: &Session, path: &str, routes: &RoutePaths) -> Access {
    // Guards reach the scanning tool without signing in
    if routes.in_guard_section(path) {
        return Access::Granted;
    }

    if config.require_auth && !session.is_authenticated() {
        return Access::Redirect(routes.login_redirect(path));
    }

    if config.require_admin && !session.is_admin() {
        return Access::Redirect(routes.home.clone());
    }

    if config.require_guard && !session.is_guard() && !routes.in_guard_section(path) {
        return Access::Redirect(routes.home.clone());
    }

    if config.require_maintenance && !session.is_maintenance() {
        return Access::Redirect(routes.home.clone());
    }

    if let Some(required) = &config.require_role {
        if session.role_str() != Some(required.as_str()) {
            return Access::Redirect(routes.home.clone());
        }
    }

    Access::Granted
}

/// Guard mounted around one page's content.
///
/// Re-checks only when the session identity or the path changes. Content is
/// withheld until the first check has passed.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    config: GuardConfig,
    routes: RoutePaths,
    authorized: bool,
    last: Option<(SessionFingerprint, String)>,
}

impl RouteGuard {
    pub fn new(config: GuardConfig, routes: RoutePaths) -> Self {
        Self {
            config,
            routes,
            authorized: false,
            last: None,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Observe the current session and path. Returns the redirect to issue
    /// when a fresh check fails; `None` when access is granted or nothing
    /// changed since the last check.
    pub fn sync(&mut self, session: &Session, path: &str) -> Option<String> {
        let key = (session.fingerprint(), path.to_string());
        if self.last.as_ref() == Some(&key) {
            return None;
        }
        self.last = Some(key);

        match evaluate(&self.config, session, path, &self.routes) {
            Access::Granted => {
                self.authorized = true;
                None
            }
            Access::Redirect(target) => {
                tracing::debug!("Route guard redirecting {} to {}", path, target);
                self.authorized = false;
                Some(target)
            }
        }
    }

    /// The wrapped content, if the last check allowed it
    pub fn render<T>(&self, content: T) -> Option<T> {
        self.authorized.then_some(content)
    }
}
