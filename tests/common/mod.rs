//! Shared utilities for integration tests.

#![allow(dead_code)]

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Notify};

use navtree::config::NavigationConfig;
use navtree::routing::{
    action_fn, loader_fn, Action, ActionContext, ActionResult, Loader, Params, Route, RouteTree,
};
use navtree::{BoxError, NavigationController, SubmissionDispatcher};

/// Loader whose invocations block until the test releases them.
///
/// Every call parks under the request path it was invoked for; tests pick
/// the order in which parked calls settle.
#[derive(Default)]
pub struct Gate {
    pending: Mutex<VecDeque<(String, oneshot::Sender<Result<Value, String>>)>>,
    arrived: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn loader(self: &Arc<Self>) -> Arc<dyn Loader> {
        let gate = self.clone();
        loader_fn(move |ctx| {
            let gate = gate.clone();
            async move {
                let (tx, rx) = oneshot::channel();
                gate.pending
                    .lock()
                    .unwrap()
                    .push_back((ctx.matched.path.clone(), tx));
                gate.arrived.notify_one();
                match rx.await {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(message)) => Err(BoxError::from(message)),
                    Err(_) => Err(BoxError::from("gate dropped")),
                }
            }
        })
    }

    /// Wait until a call for `path` is parked and take it.
    pub async fn arrival(&self, path: &str) -> oneshot::Sender<Result<Value, String>> {
        loop {
            {
                let mut pending = self.pending.lock().unwrap();
                if let Some(pos) = pending.iter().position(|(p, _)| p == path) {
                    return pending.remove(pos).unwrap().1;
                }
            }
            self.arrived.notified().await;
        }
    }

    pub async fn release(&self, path: &str, value: Value) {
        let _ = self.arrival(path).await.send(Ok(value));
    }

    pub async fn fail(&self, path: &str, message: &str) {
        let _ = self.arrival(path).await.send(Err(message.to_string()));
    }
}

/// Loader returning a fixed value and counting its invocations.
pub fn counting_loader(value: Value) -> (Arc<dyn Loader>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let loader = loader_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        let value = value.clone();
        async move { Ok(value) }
    });
    (loader, calls)
}

/// One recorded action invocation.
#[derive(Debug, Clone)]
pub struct ActionCall {
    pub route: String,
    pub params: Params,
    pub payload: Value,
    pub method: navtree::SubmissionMethod,
}

/// Action that records every call and answers with `outcome`.
pub fn recording_action(
    outcome: Result<ActionResult, String>,
) -> (Arc<dyn Action>, Arc<Mutex<Vec<ActionCall>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let log = calls.clone();
    let action = action_fn(move |ctx: ActionContext| {
        log.lock().unwrap().push(ActionCall {
            route: ctx.route.clone(),
            params: ctx.matched.params.clone(),
            payload: ctx.payload.clone(),
            method: ctx.method,
        });
        let outcome = outcome.clone();
        async move { outcome.map_err(BoxError::from) }
    });
    (action, calls)
}

pub fn controller(root: Route) -> Arc<NavigationController> {
    controller_with(root, NavigationConfig::default())
}

pub fn controller_with(root: Route, config: NavigationConfig) -> Arc<NavigationController> {
    let tree = Arc::new(RouteTree::build(root).unwrap());
    Arc::new(NavigationController::new(tree, config))
}

pub fn dispatcher(root: Route) -> SubmissionDispatcher {
    SubmissionDispatcher::new(controller(root))
}

/// Handlers for the data routes of the desktop app's tree.
#[derive(Default)]
pub struct AppHandlers {
    pub category_loader: Option<Arc<dyn Loader>>,
    pub content_list_loader: Option<Arc<dyn Loader>>,
    pub content_list_action: Option<Arc<dyn Action>>,
    pub content_loader: Option<Arc<dyn Loader>>,
    pub content_action: Option<Arc<dyn Action>>,
}

/// The desktop app's tree: `/` → config → category → contentList/:cid? → {index, content/:id}.
pub fn app_tree(handlers: AppHandlers) -> Route {
    fn with(
        mut route: Route,
        loader: Option<Arc<dyn Loader>>,
        action: Option<Arc<dyn Action>>,
    ) -> Route {
        if let Some(loader) = loader {
            route = route.loader(loader);
        }
        if let Some(action) = action {
            route = route.action(action);
        }
        route
    }

    let content = with(
        Route::new("content/:id").view("content"),
        handlers.content_loader,
        handlers.content_action,
    );
    let content_list = with(
        Route::new("contentList/:cid?").view("content-list"),
        handlers.content_list_loader,
        handlers.content_list_action,
    )
    .child(Route::index().view("welcome"))
    .child(content);
    let category = with(
        Route::new("category").view("category"),
        handlers.category_loader,
        None,
    )
    .child(content_list);

    Route::root()
        .view("home")
        .child(Route::new("config").view("config").child(category))
}
