//! Role-based access: page guards, app-wide redirects and layout choice
//!
//! Everything here is a pure function of an explicit `Session` snapshot and a
//! path. The stateful wrappers (`RouteGuard`, `RedirectSupervisor`) only add
//! change detection on top.

pub mod guard;
pub mod layout;
pub mod navigator;
pub mod pages;
pub mod routes;
pub mod supervisor;

pub use guard::{evaluate, Access, GuardConfig, RouteGuard};
pub use layout::{select_layout, DeviceClass, Layout};
pub use navigator::{Navigation, Navigator, MAX_REDIRECTS};
pub use pages::PageRegistry;
pub use routes::RoutePaths;
pub use supervisor::{auth_redirect, landing_for, redirect_for, RedirectSupervisor};
