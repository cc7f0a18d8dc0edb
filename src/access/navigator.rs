//! Resolution of a requested path into the page actually shown

use serde::Serialize;

use super::guard::{evaluate, Access};
use super::layout::{select_layout, DeviceClass, Layout};
use super::pages::PageRegistry;
use super::routes::RoutePaths;
use super::supervisor::{auth_redirect, redirect_for};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;

/// Redirect hops allowed before giving up
pub const MAX_REDIRECTS: usize = 8;

/// Where a navigation ends up and how it is drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub requested: String,
    /// Final path after all redirects
    pub path: String,
    /// Every redirect target in the order it was issued
    pub redirects: Vec<String>,
    pub layout: Layout,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Applies the app-wide supervisor, the login page's forward for signed-in
/// users and then the page guard, following redirects until a page grants
/// access
#[derive(Debug, Clone)]
pub struct Navigator {
    routes: RoutePaths,
    pages: PageRegistry,
}

impl Navigator {
    pub fn new(routes: RoutePaths, pages: PageRegistry) -> Self {
        Self { routes, pages }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.routes.clone(), PageRegistry::from_config(config))
    }

    pub fn resolve(&self, session: &Session, path: &str, device: DeviceClass) -> Result<Navigation> {
        let mut current = path.to_string();
        let mut redirects = Vec::new();

        loop {
            let next = match redirect_for(session, &current, &self.routes)
                .or_else(|| auth_redirect(session, &current, &self.routes))
            {
                Some(target) => Some(target),
                None => {
                    let guard = self.pages.guard_for(&current);
                    match evaluate(&guard, session, &current, &self.routes) {
                        Access::Granted => None,
                        Access::Redirect(target) => Some(target),
                    }
                }
            };

            let Some(target) = next else {
                break;
            };
            if redirects.len() >= MAX_REDIRECTS {
                return Err(Error::RedirectLoop(path.to_string()));
            }
            redirects.push(target.clone());
            current = target;
        }

        let layout = select_layout(device, session, &current, &self.routes);
        Ok(Navigation {
            requested: path.to_string(),
            path: current,
            redirects,
            layout,
        })
    }
}

impl Default for Navigator {
    fn default() -> Self {
        let routes = RoutePaths::default();
        let pages = PageRegistry::defaults(&routes);
        Self::new(routes, pages)
    }
}
