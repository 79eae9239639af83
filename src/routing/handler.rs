//! Collaborator seams: loaders, actions and view handles.
//!
//! The router never implements data access itself. Hosts plug in `Loader`
//! and `Action` implementations (or async closures via `loader_fn` /
//! `action_fn`) and the router decides when to call them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::BoxError;
use crate::navigation::Supersession;
use crate::routing::matcher::MatchContext;
use crate::routing::NodeId;
use crate::submission::SubmissionMethod;

/// Opaque reference to a renderable unit. The router never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(pub String);

impl ViewRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a loader sees about the navigation it runs for.
#[derive(Debug, Clone)]
pub struct LoaderContext {
    /// Node whose loader is being invoked.
    pub node: NodeId,
    /// Full declared path of that node, e.g. `/config/category`.
    pub route: String,
    /// The match shared by every loader of the cascade.
    pub matched: Arc<MatchContext>,
    /// Fires once a newer navigation has been issued.
    pub supersession: Supersession,
}

impl LoaderContext {
    /// Bound value of a path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.matched.param(name)
    }
}

/// Everything an action sees about the submission it handles.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub node: NodeId,
    pub route: String,
    pub matched: Arc<MatchContext>,
    pub method: SubmissionMethod,
    pub payload: Value,
}

impl ActionContext {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.matched.param(name)
    }
}

/// Successful outcome of an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Data handed back to the submitter.
    pub data: Value,
    /// Path to navigate to afterwards instead of the submitted one.
    pub redirect: Option<String>,
}

impl ActionResult {
    pub fn data(data: Value) -> Self {
        Self { data, redirect: None }
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            redirect: Some(path.into()),
        }
    }
}

/// Asynchronous read run before a navigation is committed.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, ctx: LoaderContext) -> Result<Value, BoxError>;
}

/// Asynchronous mutation run by a submission.
#[async_trait]
pub trait Action: Send + Sync {
    async fn act(&self, ctx: ActionContext) -> Result<ActionResult, BoxError>;
}

/// Loader backed by an async closure.
pub struct FnLoader<F>(F);

#[async_trait]
impl<F, Fut> Loader for FnLoader<F>
where
    F: Fn(LoaderContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    async fn load(&self, ctx: LoaderContext) -> Result<Value, BoxError> {
        (self.0)(ctx).await
    }
}

/// Action backed by an async closure.
pub struct FnAction<F>(F);

#[async_trait]
impl<F, Fut> Action for FnAction<F>
where
    F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResult, BoxError>> + Send + 'static,
{
    async fn act(&self, ctx: ActionContext) -> Result<ActionResult, BoxError> {
        (self.0)(ctx).await
    }
}

/// Wrap an async closure as a shared loader handle.
pub fn loader_fn<F, Fut>(f: F) -> Arc<dyn Loader>
where
    F: Fn(LoaderContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    Arc::new(FnLoader(f))
}

/// Wrap an async closure as a shared action handle.
pub fn action_fn<F, Fut>(f: F) -> Arc<dyn Action>
where
    F: Fn(ActionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResult, BoxError>> + Send + 'static,
{
    Arc::new(FnAction(f))
}
