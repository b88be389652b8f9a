//! Client route table.
//!
//! DESIGN
//! ======
//! The table is built exactly once, gated by the bootstrap orchestrator on
//! the first profile-fetch event. `init_routes` itself is idempotent: a
//! second call leaves the existing table in place. Paths use `{param}`
//! segments and resolution captures parameter values by name.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, info};

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(&'static str),
}

// =============================================================================
// ROUTES
// =============================================================================

/// Navigable application views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Login,
    Dashboard,
    Workspace,
}

/// A single navigable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
}

/// A resolved route: the page plus captured path parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub page: Page,
    pub params: HashMap<String, String>,
}

/// The set of navigable views.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, rejecting duplicate paths.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouterError> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.path) {
                return Err(RouterError::DuplicatePath(route.path));
            }
        }
        Ok(Self { routes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve a concrete path against the table, capturing `{param}` values.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        'routes: for route in &self.routes {
            let pattern: Vec<&str> = route.path.split('/').filter(|s| !s.is_empty()).collect();
            if pattern.len() != segments.len() {
                continue;
            }

            let mut params = HashMap::new();
            for (pat, seg) in pattern.iter().zip(&segments) {
                if let Some(name) = pat.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    params.insert(name.to_string(), (*seg).to_string());
                } else if pat != seg {
                    continue 'routes;
                }
            }
            return Some(RouteMatch { page: route.page, params });
        }
        None
    }
}

/// Default client routes: auth, project dashboard, file workspace.
fn default_routes() -> Vec<Route> {
    vec![
        Route { path: "/login", page: Page::Login },
        Route { path: "/dashboard", page: Page::Dashboard },
        Route { path: "/workspace/{file_id}", page: Page::Workspace },
    ]
}

// =============================================================================
// ROUTER SEAM
// =============================================================================

/// Route-table initialization, called at most once by the orchestrator.
pub trait RouteInit: Send + Sync {
    fn init_routes(&self) -> Result<(), RouterError>;
}

/// The real router. Holds the table once initialized.
pub struct AppRouter {
    table: OnceLock<RouteTable>,
}

impl AppRouter {
    #[must_use]
    pub fn new() -> Self {
        Self { table: OnceLock::new() }
    }

    /// The initialized table, if `init_routes` has run.
    #[must_use]
    pub fn table(&self) -> Option<&RouteTable> {
        self.table.get()
    }
}

impl RouteInit for AppRouter {
    fn init_routes(&self) -> Result<(), RouterError> {
        let table = RouteTable::new(default_routes())?;
        let count = table.len();
        if self.table.set(table).is_err() {
            debug!("router: route table already initialized");
        } else {
            info!(routes = count, "router: route table initialized");
        }
        Ok(())
    }
}

impl Default for AppRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
