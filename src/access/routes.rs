//! Well-known paths of the portal

use serde::{Deserialize, Serialize};

/// Landing pages and section roots used by access decisions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePaths {
    #[serde(default = "default_login")]
    pub login: String,

    /// Default landing page
    #[serde(default = "default_home")]
    pub home: String,

    /// Admin section root
    #[serde(default = "default_admin")]
    pub admin: String,

    /// Guard section root, also the guard landing page
    #[serde(default = "default_guard")]
    pub guard: String,

    /// Maintenance section root, also the maintenance landing page
    #[serde(default = "default_maintenance")]
    pub maintenance: String,
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_home() -> String {
    "/home".to_string()
}

fn default_admin() -> String {
    "/admin".to_string()
}

fn default_guard() -> String {
    "/vigilante".to_string()
}

fn default_maintenance() -> String {
    "/mantenimiento".to_string()
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: default_login(),
            home: default_home(),
            admin: default_admin(),
            guard: default_guard(),
            maintenance: default_maintenance(),
        }
    }
}

impl RoutePaths {
    pub fn in_login_section(&self, path: &str) -> bool {
        in_section(path, &self.login)
    }

    pub fn in_guard_section(&self, path: &str) -> bool {
        in_section(path, &self.guard)
    }

    pub fn in_maintenance_section(&self, path: &str) -> bool {
        in_section(path, &self.maintenance)
    }

    pub fn in_admin_section(&self, path: &str) -> bool {
        in_section(path, &self.admin)
    }

    /// Login page carrying the page to come back to
    pub fn login_redirect(&self, return_to: &str) -> String {
        format!("{}?redirect={}", self.login, urlencoding::encode(return_to))
    }
}

/// Path without its query string or fragment
pub fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// `path` is the section root or somewhere below it
pub fn in_section(path: &str, section: &str) -> bool {
    let path = strip_query(path);
    let section = section.trim_end_matches('/');
    if section.is_empty() {
        return true;
    }
    match path.strip_prefix(section) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_section() {
        assert!(in_section("/vigilante", "/vigilante"));
        assert!(in_section("/vigilante/scan", "/vigilante"));
        assert!(in_section("/vigilante?code=1", "/vigilante"));
        assert!(!in_section("/vigilantes", "/vigilante"));
        assert!(!in_section("/home", "/vigilante"));
    }

    #[test]
    fn test_login_redirect_encodes_path() {
        let routes = RoutePaths::default();
        assert_eq!(routes.login_redirect("/profile"), "/login?redirect=%2Fprofile");
        assert_eq!(
            routes.login_redirect("/admin/usuarios"),
            "/login?redirect=%2Fadmin%2Fusuarios"
        );
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/login?redirect=%2Fhome"), "/login");
        assert_eq!(strip_query("/avisos#top"), "/avisos");
        assert_eq!(strip_query("/home"), "/home");
    }
}
