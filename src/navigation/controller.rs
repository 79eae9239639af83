//! Navigation controller.
//!
//! # Responsibilities
//! - Own the single current `NavigationState`
//! - Match the requested path, run the chain's loaders concurrently, commit
//! - Drop results of superseded cascades (last request wins)
//! - Keep back/forward history of committed locations
//! - Push every transition to subscribers
//!
//! # Design Decisions
//! - Reads are lock-free `ArcSwap` snapshots; writers serialise on one mutex
//!   so issuing a sequence number and committing are atomic
//! - Loader results are attributed by chain position, not completion order
//! - The first failing loader in chain order is the reported error

use arc_swap::ArcSwap;
use futures_util::future::join_all;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::{broadcast, watch};

use crate::config::NavigationConfig;
use crate::error::RouterError;
use crate::navigation::history::{History, NavigationKind};
use crate::navigation::state::{LoaderResults, NavigationState};
use crate::navigation::supersession::Supersession;
use crate::observability::metrics;
use crate::routing::{Loader, LoaderContext, MatchContext, MatchResult, RouteTree};

/// Result of one `navigate` call.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// This request's result became the current state.
    Committed(Arc<NavigationState>),
    /// A newer request was issued before this one settled; its result was dropped.
    Superseded { seq: u64 },
}

impl NavigationOutcome {
    pub fn state(&self) -> Option<&Arc<NavigationState>> {
        match self {
            NavigationOutcome::Committed(state) => Some(state),
            NavigationOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, NavigationOutcome::Committed(_))
    }
}

/// Owns navigation state for one route tree.
pub struct NavigationController {
    tree: Arc<RouteTree>,
    config: NavigationConfig,
    state: ArcSwap<NavigationState>,
    latest: watch::Sender<u64>,
    history: Mutex<History>,
    events: broadcast::Sender<Arc<NavigationState>>,
}

impl NavigationController {
    pub fn new(tree: Arc<RouteTree>, config: NavigationConfig) -> Self {
        let (latest, _) = watch::channel(0);
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            tree,
            history: Mutex::new(History::new(config.history_limit)),
            config,
            state: ArcSwap::from_pointee(NavigationState::Idle),
            latest,
            events,
        }
    }

    pub fn tree(&self) -> &Arc<RouteTree> {
        &self.tree
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> Arc<NavigationState> {
        self.state.load_full()
    }

    /// Receive every subsequent state transition.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<NavigationState>> {
        self.events.subscribe()
    }

    /// Path of the last committed navigation.
    pub fn location(&self) -> Option<String> {
        self.lock_history().current().map(str::to_string)
    }

    pub fn can_go_back(&self) -> bool {
        self.lock_history().peek_back().is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.lock_history().peek_forward().is_some()
    }

    /// Navigate to `path`, adding a history entry.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        self.run(path, NavigationKind::Push).await
    }

    /// Navigate to `path`, replacing the current history entry.
    pub async fn replace(&self, path: &str) -> NavigationOutcome {
        self.run(path, NavigationKind::Replace).await
    }

    /// Re-run the cascade for the current location.
    pub async fn revalidate(&self) -> Option<NavigationOutcome> {
        let path = self.location()?;
        Some(self.run(&path, NavigationKind::Replace).await)
    }

    /// Navigate to the previous committed location, if any.
    pub async fn back(&self) -> Option<NavigationOutcome> {
        let target = self.lock_history().peek_back().map(str::to_string)?;
        Some(self.run(&target, NavigationKind::Back).await)
    }

    /// Navigate to the next location undone by `back`, if any.
    pub async fn forward(&self) -> Option<NavigationOutcome> {
        let target = self.lock_history().peek_forward().map(str::to_string)?;
        Some(self.run(&target, NavigationKind::Forward).await)
    }

    async fn run(&self, path: &str, kind: NavigationKind) -> NavigationOutcome {
        let started = Instant::now();
        let supersession = self.issue(path);
        let seq = supersession.seq();

        let next = match self.tree.match_path(path) {
            MatchResult::NoMatch => {
                tracing::warn!(seq, path = %path, "No route matched");
                NavigationState::Failed {
                    seq,
                    path: path.to_string(),
                    prefix: None,
                    results: LoaderResults::default(),
                    error: RouterError::RouteNotFound {
                        path: path.to_string(),
                    },
                }
            }
            MatchResult::Matched(matched) => self.resolve(seq, Arc::new(matched), supersession).await,
        };

        let outcome = self.commit(seq, next, kind);
        match &outcome {
            NavigationOutcome::Committed(state) => metrics::record_navigation(state.label(), started),
            NavigationOutcome::Superseded { .. } => metrics::record_navigation("superseded", started),
        }
        outcome
    }

    /// Assign the next sequence number and publish `Loading`.
    fn issue(&self, path: &str) -> Supersession {
        // Held so sequence numbers are ordered against commits.
        let _writer = self.lock_history();
        let seq = *self.latest.borrow() + 1;
        self.latest.send_replace(seq);

        tracing::debug!(seq, path = %path, "Navigation started");
        self.publish(Arc::new(NavigationState::Loading {
            seq,
            path: path.to_string(),
        }));
        Supersession::new(seq, self.latest.subscribe())
    }

    /// Run every loader of the chain concurrently and fold the results.
    async fn resolve(&self, seq: u64, matched: Arc<MatchContext>, supersession: Supersession) -> NavigationState {
        let loads = matched.chain.iter().map(|entry| {
            let node = &self.tree[entry.node];
            let loader = node.loader().cloned();
            let ctx = LoaderContext {
                node: entry.node,
                route: node.route().to_string(),
                matched: matched.clone(),
                supersession: supersession.clone(),
            };
            async move {
                match loader {
                    Some(loader) => self.invoke(loader, ctx).await,
                    None => Ok(Value::Null),
                }
            }
        });
        let settled = join_all(loads).await;

        let mut results = LoaderResults::default();
        for (position, (entry, outcome)) in matched.chain.iter().zip(settled).enumerate() {
            match outcome {
                Ok(data) => results.push(entry.node, data),
                Err(error) => {
                    tracing::warn!(
                        seq,
                        path = %matched.path,
                        route = %self.tree[entry.node].route(),
                        error = %error,
                        "Loader failed"
                    );
                    return NavigationState::Failed {
                        seq,
                        path: matched.path.clone(),
                        prefix: Some(Arc::new(matched.prefix(position))),
                        results,
                        error,
                    };
                }
            }
        }

        NavigationState::Loaded {
            seq,
            matched,
            results,
        }
    }

    async fn invoke(&self, loader: Arc<dyn Loader>, ctx: LoaderContext) -> Result<Value, RouterError> {
        let node = ctx.node;
        let route = ctx.route.clone();
        let started = Instant::now();

        let result = match self.config.loader_timeout() {
            Some(deadline) => match tokio::time::timeout(deadline, loader.load(ctx)).await {
                Ok(result) => result.map_err(|cause| RouterError::Loader {
                    node,
                    route: route.clone(),
                    cause: Arc::from(cause),
                }),
                Err(_) => Err(RouterError::LoaderTimeout {
                    node,
                    route: route.clone(),
                    timeout_ms: self.config.loader_timeout_ms,
                }),
            },
            None => loader.load(ctx).await.map_err(|cause| RouterError::Loader {
                node,
                route: route.clone(),
                cause: Arc::from(cause),
            }),
        };

        metrics::record_loader(&route, result.is_ok(), started);
        result
    }

    /// Commit `next` if `seq` is still the latest request.
    fn commit(&self, seq: u64, next: NavigationState, kind: NavigationKind) -> NavigationOutcome {
        let mut history = self.lock_history();
        let latest = *self.latest.borrow();
        if latest != seq {
            tracing::debug!(seq, latest, "Navigation superseded, result discarded");
            metrics::record_superseded();
            return NavigationOutcome::Superseded { seq };
        }

        if let Some(path) = next.path() {
            history.record(path, kind);
        }
        match &next {
            NavigationState::Failed { error, .. } => {
                tracing::warn!(seq, path = ?next.path(), error = %error, "Navigation failed");
            }
            _ => {
                tracing::info!(seq, path = ?next.path(), "Navigation committed");
            }
        }

        let next = Arc::new(next);
        self.publish(next.clone());
        NavigationOutcome::Committed(next)
    }

    fn publish(&self, state: Arc<NavigationState>) {
        self.state.store(state.clone());
        // No subscribers is fine.
        let _ = self.events.send(state);
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("nodes", &self.tree.len())
            .field("state", &self.current_state().label())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{loader_fn, Route};
    use serde_json::json;
    use std::time::Duration;

    fn controller(root: Route, config: NavigationConfig) -> NavigationController {
        NavigationController::new(Arc::new(RouteTree::build(root).unwrap()), config)
    }

    fn config_tree() -> Route {
        Route::root().child(
            Route::new("config")
                .loader(loader_fn(|_| async { Ok(json!("L1")) }))
                .child(Route::new("category").loader(loader_fn(|_| async { Ok(json!("L2")) }))),
        )
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let nav = controller(config_tree(), NavigationConfig::default());
        assert!(matches!(*nav.current_state(), NavigationState::Idle));
        assert_eq!(nav.location(), None);
    }

    #[tokio::test]
    async fn test_loaded_results_keyed_by_node() {
        let nav = controller(config_tree(), NavigationConfig::default());
        let outcome = nav.navigate("/config/category").await;
        let state = outcome.state().unwrap();

        let NavigationState::Loaded { matched, results, .. } = state.as_ref() else {
            panic!("expected Loaded, got {:?}", state);
        };
        let config = nav.tree().find("/config").unwrap().id();
        let category = nav.tree().find("/config/category").unwrap().id();
        assert_eq!(matched.nodes().collect::<Vec<_>>().len(), 3);
        assert!(matched.params.is_empty());
        assert_eq!(results.get(config), Some(&json!("L1")));
        assert_eq!(results.get(category), Some(&json!("L2")));
        assert_eq!(results.get(crate::routing::NodeId::ROOT), Some(&Value::Null));
        assert_eq!(nav.location().as_deref(), Some("/config/category"));
    }

    #[tokio::test]
    async fn test_no_match_fails_without_prefix() {
        let nav = controller(config_tree(), NavigationConfig::default());
        let outcome = nav.navigate("/nonexistent").await;
        let state = outcome.state().unwrap();
        assert!(matches!(
            state.error(),
            Some(RouterError::RouteNotFound { path }) if path == "/nonexistent"
        ));
        assert!(state.matched().is_none());
    }

    #[tokio::test]
    async fn test_loader_timeout() {
        let root = Route::root().child(Route::new("slow").loader(loader_fn(|_| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Value::Null)
        })));
        let config = NavigationConfig {
            loader_timeout_ms: 20,
            ..NavigationConfig::default()
        };
        let nav = controller(root, config);
        let outcome = nav.navigate("/slow").await;
        assert!(matches!(
            outcome.state().unwrap().error(),
            Some(RouterError::LoaderTimeout { timeout_ms: 20, .. })
        ));
    }

    #[tokio::test]
    async fn test_subscribers_see_loading_then_loaded() {
        let nav = controller(config_tree(), NavigationConfig::default());
        let mut events = nav.subscribe();
        nav.navigate("/config").await;

        let first = events.recv().await.unwrap();
        assert!(first.is_loading());
        let second = events.recv().await.unwrap();
        assert_eq!(second.label(), "loaded");
        assert_eq!(second.seq(), first.seq());
    }
}
