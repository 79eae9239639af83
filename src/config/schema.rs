//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the navigation router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Navigation controller settings.
    pub navigation: NavigationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// The route tree, starting at `/`.
    pub root: RouteDecl,
}

/// Navigation controller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum entries kept on each of the back and forward stacks.
    pub history_limit: usize,

    /// Buffered state events per subscriber before it starts lagging.
    pub event_capacity: usize,

    /// Per-loader deadline in milliseconds (0 = no deadline).
    pub loader_timeout_ms: u64,
}

impl NavigationConfig {
    pub fn loader_timeout(&self) -> Option<Duration> {
        (self.loader_timeout_ms > 0).then(|| Duration::from_millis(self.loader_timeout_ms))
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            event_capacity: 64,
            loader_timeout_ms: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record navigation/submission metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

/// Declared route, as written in the config file.
///
/// Loader, action and view names refer to host collaborators and are
/// resolved when the declaration is turned into a `Route`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteDecl {
    /// Path relative to the parent. Absent for index routes.
    #[serde(default)]
    pub path: Option<String>,

    /// Render at the parent's exact path.
    #[serde(default)]
    pub index: bool,

    /// Name used in logs and lookups.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub view: Option<String>,

    #[serde(default)]
    pub loader: Option<String>,

    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub children: Vec<RouteDecl>,
}

impl Default for RouteDecl {
    fn default() -> Self {
        Self {
            path: Some("/".to_string()),
            index: false,
            name: None,
            view: None,
            loader: None,
            action: None,
            children: Vec::new(),
        }
    }
}

impl RouteDecl {
    /// Depth-first walk over this declaration and its descendants.
    pub fn walk(&self) -> Vec<&RouteDecl> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}
