//! Choice of visual shell

use serde::{Deserialize, Serialize};
use std::fmt;

use super::routes::RoutePaths;
use crate::session::Session;

/// Viewport width below which a device is a phone
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Viewport width below which a device is a tablet
pub const TABLET_MAX_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_width(width: u32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            DeviceClass::Mobile
        } else if width < TABLET_MAX_WIDTH {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Checkpoint shell for guards
    Guard,
    Mobile,
    Desktop,
    Plain,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Guard => "guard",
            Layout::Mobile => "mobile",
            Layout::Desktop => "desktop",
            Layout::Plain => "plain",
        };
        write!(f, "{}", name)
    }
}

pub fn select_layout(device: DeviceClass, session: &Session, path: &str, routes: &RoutePaths) -> Layout {
    if session.is_guard() || routes.in_guard_section(path) {
        return Layout::Guard;
    }
    if session.is_maintenance() || routes.in_maintenance_section(path) {
        return Layout::Mobile;
    }
    if session.is_admin() && device != DeviceClass::Mobile && routes.in_admin_section(path) {
        return Layout::Desktop;
    }
    match device {
        DeviceClass::Mobile | DeviceClass::Tablet => Layout::Mobile,
        DeviceClass::Desktop => Layout::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;
    use crate::session::Authenticated;

    fn signed_in(role: &str) -> Session {
        let user = User::new("Ana", "Pérez", "ana@example.com", role);
        Session::authenticated(Authenticated::new(user, "tok".to_string()).unwrap(), false)
    }

    #[test]
    fn test_device_from_width() {
        assert_eq!(DeviceClass::from_width(375), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_width(768), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_width(1023), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_width(1440), DeviceClass::Desktop);
    }

    #[test]
    fn test_guard_shell_wins() {
        let routes = RoutePaths::default();
        assert_eq!(
            select_layout(DeviceClass::Desktop, &signed_in("vigilante"), "/admin", &routes),
            Layout::Guard
        );
        assert_eq!(
            select_layout(DeviceClass::Desktop, &Session::default(), "/vigilante", &routes),
            Layout::Guard
        );
    }

    #[test]
    fn test_maintenance_gets_mobile_shell_on_desktop() {
        let routes = RoutePaths::default();
        assert_eq!(
            select_layout(DeviceClass::Desktop, &signed_in("mantenimiento"), "/mantenimiento", &routes),
            Layout::Mobile
        );
    }

    #[test]
    fn test_admin_desktop_only_under_admin_path() {
        let routes = RoutePaths::default();
        let admin = signed_in("administrador");
        assert_eq!(select_layout(DeviceClass::Tablet, &admin, "/admin/usuarios", &routes), Layout::Desktop);
        assert_eq!(select_layout(DeviceClass::Desktop, &admin, "/admin", &routes), Layout::Desktop);
        assert_eq!(select_layout(DeviceClass::Mobile, &admin, "/admin", &routes), Layout::Mobile);
        assert_eq!(select_layout(DeviceClass::Desktop, &admin, "/home", &routes), Layout::Plain);
    }

    #[test]
    fn test_residents_follow_viewport() {
        let routes = RoutePaths::default();
        let resident = signed_in("residente");
        assert_eq!(select_layout(DeviceClass::Mobile, &resident, "/home", &routes), Layout::Mobile);
        assert_eq!(select_layout(DeviceClass::Tablet, &resident, "/home", &routes), Layout::Mobile);
        assert_eq!(select_layout(DeviceClass::Desktop, &resident, "/home", &routes), Layout::Plain);
    }
}
