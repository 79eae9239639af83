//! Navigation state snapshots.
//!
//! # States
//! - Idle: nothing navigated yet
//! - Loading: a cascade for `path` is in flight
//! - Loaded: every loader of the matched chain settled successfully
//! - Failed: no match, or a loader failed
//!
//! # State Transitions
//! ```text
//! any state → Loading(seq, path)           on navigate
//! Loading   → Loaded(match, results)       all loaders succeed
//! Loading   → Failed(prefix, error)        no match / first failing loader in chain order
//! ```
//!
//! # Design Decisions
//! - Snapshots are replaced wholesale, never mutated in place
//! - A Failed state keeps the matched prefix and its results so the host can
//!   render a partial view

use serde_json::Value;
use std::sync::Arc;

use crate::error::RouterError;
use crate::routing::{MatchContext, NodeId};

/// Loader output per matched node, in chain order.
///
/// Nodes without a loader contribute `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoaderResults(Vec<(NodeId, Value)>);

impl LoaderResults {
    pub fn get(&self, node: NodeId) -> Option<&Value> {
        self.0.iter().find(|(id, _)| *id == node).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Value)> {
        self.0.iter().map(|(id, v)| (*id, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, node: NodeId, data: Value) {
        self.0.push((node, data));
    }
}

/// The current navigation state.
#[derive(Debug, Clone)]
pub enum NavigationState {
    Idle,
    Loading {
        seq: u64,
        path: String,
    },
    Loaded {
        seq: u64,
        matched: Arc<MatchContext>,
        results: LoaderResults,
    },
    Failed {
        seq: u64,
        path: String,
        /// Chain nodes before the failing one. `None` when nothing matched.
        prefix: Option<Arc<MatchContext>>,
        results: LoaderResults,
        error: RouterError,
    },
}

impl NavigationState {
    /// Request sequence number (0 for Idle).
    pub fn seq(&self) -> u64 {
        match self {
            NavigationState::Idle => 0,
            NavigationState::Loading { seq, .. }
            | NavigationState::Loaded { seq, .. }
            | NavigationState::Failed { seq, .. } => *seq,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationState::Idle => None,
            NavigationState::Loading { path, .. } | NavigationState::Failed { path, .. } => Some(path.as_str()),
            NavigationState::Loaded { matched, .. } => Some(matched.path.as_str()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, NavigationState::Loading { .. })
    }

    /// Loaded or Failed.
    pub fn is_at_rest(&self) -> bool {
        matches!(
            self,
            NavigationState::Loaded { .. } | NavigationState::Failed { .. }
        )
    }

    pub fn error(&self) -> Option<&RouterError> {
        match self {
            NavigationState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&LoaderResults> {
        match self {
            NavigationState::Loaded { results, .. } | NavigationState::Failed { results, .. } => {
                Some(results)
            }
            _ => None,
        }
    }

    /// The matched chain (full for Loaded, prefix for Failed).
    pub fn matched(&self) -> Option<&MatchContext> {
        match self {
            NavigationState::Loaded { matched, .. } => Some(matched.as_ref()),
            NavigationState::Failed { prefix, .. } => prefix.as_deref(),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavigationState::Idle => "idle",
            NavigationState::Loading { .. } => "loading",
            NavigationState::Loaded { .. } => "loaded",
            NavigationState::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loader_results_lookup() {
        let mut results = LoaderResults::default();
        results.push(NodeId(0), Value::Null);
        results.push(NodeId(2), json!({"items": 3}));

        assert_eq!(results.len(), 2);
        assert_eq!(results.get(NodeId(2)), Some(&json!({"items": 3})));
        assert_eq!(results.get(NodeId(0)), Some(&Value::Null));
        assert_eq!(results.get(NodeId(1)), None);
    }

    #[test]
    fn test_state_accessors() {
        let state = NavigationState::Loading {
            seq: 3,
            path: "/config".into(),
        };
        assert_eq!(state.seq(), 3);
        assert_eq!(state.path(), Some("/config"));
        assert!(state.is_loading());
        assert!(!state.is_at_rest());
        assert_eq!(state.label(), "loading");

        let failed = NavigationState::Failed {
            seq: 4,
            path: "/nonexistent".into(),
            prefix: None,
            results: LoaderResults::default(),
            error: RouterError::RouteNotFound {
                path: "/nonexistent".into(),
            },
        };
        assert!(failed.is_at_rest());
        assert!(failed.matched().is_none());
        assert_eq!(failed.error().map(RouterError::kind), Some("route_not_found"));
        assert_eq!(NavigationState::Idle.seq(), 0);
    }
}
