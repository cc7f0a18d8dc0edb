//! App-wide role redirects

use super::routes::RoutePaths;
use crate::session::{Session, SessionFingerprint};

/// Where a signed-in user must be sent because their role does not belong on
/// `path`. Administrators and residents outside the guard and maintenance
/// sections are never redirected.
pub fn redirect_for(session: &Session, path: &str, routes: &RoutePaths) -> Option<String> {
    if !session.is_authenticated() {
        return None;
    }

    let in_guard = routes.in_guard_section(path);
    let in_maintenance = routes.in_maintenance_section(path);

    if session.is_guard() && !in_guard {
        return Some(routes.guard.clone());
    }
    if session.is_maintenance() && !in_maintenance {
        return Some(routes.maintenance.clone());
    }
    if !session.is_guard() && in_guard {
        return Some(routes.home.clone());
    }
    if !session.is_maintenance() && in_maintenance {
        return Some(routes.home.clone());
    }

    None
}

/// Landing page for the session's role
pub fn landing_for(session: &Session, routes: &RoutePaths) -> String {
    if session.is_guard() {
        routes.guard.clone()
    } else if session.is_maintenance() {
        routes.maintenance.clone()
    } else {
        routes.home.clone()
    }
}

/// Sends a signed-in user who opens the login page on to their landing page
pub fn auth_redirect(session: &Session, path: &str, routes: &RoutePaths) -> Option<String> {
    if session.is_authenticated() && routes.in_login_section(path) {
        Some(landing_for(session, routes))
    } else {
        None
    }
}

/// One per application root. Applies `redirect_for` whenever the path or the
/// session identity changes.
#[derive(Debug, Clone, Default)]
pub struct RedirectSupervisor {
    routes: RoutePaths,
    last: Option<(SessionFingerprint, String)>,
}

impl RedirectSupervisor {
    pub fn new(routes: RoutePaths) -> Self {
        Self { routes, last: None }
    }

    pub fn observe(&mut self, session: &Session, path: &str) -> Option<String> {
        let key = (session.fingerprint(), path.to_string());
        if self.last.as_ref() == Some(&key) {
            return None;
        }
        self.last = Some(key);

        let target = redirect_for(session, path, &self.routes)?;
        tracing::debug!("Supervisor redirecting {} to {}", path, target);
        Some(target)
    }
}
