//! Error kinds surfaced by the router.
//!
//! Matcher, loader and action failures never escape as panics: navigation
//! failures become a `Failed` state and submission failures are returned
//! from `submit`. `RouterError` is `Clone` so it can be stored inside shared
//! state snapshots.

use std::sync::Arc;
use thiserror::Error;

use crate::routing::NodeId;

/// Error type returned by loader and action collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared cause of a collaborator failure.
pub type Cause = Arc<dyn std::error::Error + Send + Sync>;

/// Errors produced while navigating or submitting.
#[derive(Debug, Clone, Error)]
pub enum RouterError {
    /// No chain of routes matches the requested path.
    #[error("no route matches `{path}`")]
    RouteNotFound { path: String },

    /// A loader rejected.
    #[error("loader for route `{route}` failed: {cause}")]
    Loader {
        node: NodeId,
        route: String,
        #[source]
        cause: Cause,
    },

    /// A loader did not settle within the configured deadline.
    #[error("loader for route `{route}` timed out after {timeout_ms} ms")]
    LoaderTimeout {
        node: NodeId,
        route: String,
        timeout_ms: u64,
    },

    /// An action rejected.
    #[error("action for route `{route}` failed: {cause}")]
    Action {
        node: NodeId,
        route: String,
        #[source]
        cause: Cause,
    },

    /// The submission path matched, but no node along the chain declares an action.
    #[error("no action declared along `{path}`")]
    NoAction { path: String },
}

impl RouterError {
    /// The node the error originated from, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            RouterError::Loader { node, .. }
            | RouterError::LoaderTimeout { node, .. }
            | RouterError::Action { node, .. } => Some(*node),
            RouterError::RouteNotFound { .. } | RouterError::NoAction { .. } => None,
        }
    }

    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::RouteNotFound { .. } => "route_not_found",
            RouterError::Loader { .. } => "loader",
            RouterError::LoaderTimeout { .. } => "loader_timeout",
            RouterError::Action { .. } => "action",
            RouterError::NoAction { .. } => "no_action",
        }
    }
}

pub type RouterResult<T> = Result<T, RouterError>;
