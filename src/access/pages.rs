//! Guard configuration declared by each page

use super::guard::GuardConfig;
use super::routes::{in_section, strip_query, RoutePaths};
use crate::config::{Config, PageConfig};

/// Page path prefixes and their guard configuration. Lookup picks the longest
/// matching prefix; paths no page claims are open.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: Vec<(String, GuardConfig)>,
}

impl PageRegistry {
    /// The portal's built-in pages
    pub fn defaults(routes: &RoutePaths) -> Self {
        let mut registry = Self::default();
        registry.declare(&routes.login, GuardConfig::open());
        registry.declare(&routes.home, GuardConfig::authenticated());
        registry.declare("/profile", GuardConfig::authenticated());
        registry.declare("/visitantes", GuardConfig::authenticated());
        registry.declare("/reservas", GuardConfig::authenticated());
        registry.declare("/avisos", GuardConfig::authenticated());
        registry.declare("/negocios", GuardConfig::authenticated());
        registry.declare(&routes.admin, GuardConfig::authenticated().with_admin());
        registry.declare(&routes.guard, GuardConfig::open().with_guard());
        registry.declare(
            &routes.maintenance,
            GuardConfig::authenticated().with_maintenance(),
        );
        registry
    }

    /// Built-in pages plus the `[[pages]]` entries from the config
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::defaults(&config.routes);
        registry.extend(&config.pages);
        registry
    }

    /// Add a page or replace the declaration for an existing path
    pub fn declare(&mut self, path: &str, guard: GuardConfig) {
        let path = path.trim_end_matches('/').to_string();
        match self.pages.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = guard,
            None => self.pages.push((path, guard)),
        }
    }

    pub fn extend(&mut self, pages: &[PageConfig]) {
        for page in pages {
            self.declare(&page.path, page.guard.clone());
        }
    }

    /// Guard configuration for the page serving `path`
    pub fn guard_for(&self, path: &str) -> GuardConfig {
        let path = strip_query(path);
        self.pages
            .iter()
            .filter(|(prefix, _)| in_section(path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, guard)| guard.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
