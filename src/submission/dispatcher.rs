//! Submission dispatcher.
//!
//! # Responsibilities
//! - Resolve the submitted path to a chain
//! - Pick the deepest node that declares an action
//! - Run the action, then hand the resulting navigation to the controller
//!
//! # Design Decisions
//! - Failures come back as `Err`, never as panics
//! - A failed action does not navigate
//! - A successful action navigates to its redirect, or re-navigates to the
//!   submitted path so loaders see the mutation

use serde_json::Value;
use std::sync::Arc;

use crate::error::RouterError;
use crate::navigation::{NavigationController, NavigationOutcome};
use crate::observability::metrics;
use crate::routing::{Action, ActionContext, MatchContext, MatchResult, NodeId};
use crate::submission::SubmissionMethod;

/// What a successful submission produced.
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// Node whose action handled the submission.
    pub node: NodeId,
    pub route: String,
    /// Data returned by the action.
    pub data: Value,
    /// Outcome of the navigation triggered afterwards.
    pub navigation: NavigationOutcome,
}

/// Routes submissions to actions and revalidates afterwards.
#[derive(Debug, Clone)]
pub struct SubmissionDispatcher {
    controller: Arc<NavigationController>,
}

impl SubmissionDispatcher {
    pub fn new(controller: Arc<NavigationController>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &Arc<NavigationController> {
        &self.controller
    }

    /// Dispatch `payload` to the action nearest to the leaf of `path`'s chain.
    pub async fn submit(
        &self,
        path: &str,
        payload: Value,
        method: SubmissionMethod,
    ) -> Result<SubmissionResult, RouterError> {
        let (node, action, matched) = match self.resolve(path) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!(path = %path, method = %method, error = %e, "Submission rejected");
                metrics::record_submission(method.as_str(), e.kind());
                return Err(e);
            }
        };
        let route = self.controller.tree()[node].route().to_string();

        tracing::info!(path = %path, route = %route, method = %method, "Dispatching submission");
        let ctx = ActionContext {
            node,
            route: route.clone(),
            matched,
            method,
            payload,
        };

        let result = match action.act(ctx).await {
            Ok(result) => result,
            Err(cause) => {
                let error = RouterError::Action {
                    node,
                    route,
                    cause: Arc::from(cause),
                };
                tracing::warn!(path = %path, method = %method, error = %error, "Action failed");
                metrics::record_submission(method.as_str(), error.kind());
                return Err(error);
            }
        };

        let target = result.redirect.as_deref().unwrap_or(path);
        if result.redirect.is_some() {
            tracing::debug!(path = %path, redirect = %target, "Action redirected");
        }
        let navigation = self.controller.navigate(target).await;
        metrics::record_submission(method.as_str(), "ok");

        Ok(SubmissionResult {
            node,
            route,
            data: result.data,
            navigation,
        })
    }

    fn resolve(&self, path: &str) -> Result<(NodeId, Arc<dyn Action>, Arc<MatchContext>), RouterError> {
        let tree = self.controller.tree();
        let matched = match tree.match_path(path) {
            MatchResult::Matched(matched) => matched,
            MatchResult::NoMatch => {
                return Err(RouterError::RouteNotFound {
                    path: path.to_string(),
                })
            }
        };

        let (node, action) = matched
            .chain
            .iter()
            .rev()
            .find_map(|m| tree[m.node].action().map(|action| (m.node, action.clone())))
            .ok_or_else(|| RouterError::NoAction {
                path: path.to_string(),
            })?;

        Ok((node, action, Arc::new(matched)))
    }
}
