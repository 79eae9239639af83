//! In-memory route declaration.
//!
//! A `Route` is what the host hands to `RouteTree::build`. It is a plain
//! nested value; nothing is parsed or checked until the tree is built.

use std::fmt;
use std::sync::Arc;

use crate::routing::handler::{Action, Loader, ViewRef};

/// Declaration of one route and its descendants.
#[derive(Clone, Default)]
pub struct Route {
    pub(crate) path: Option<String>,
    pub(crate) index: bool,
    pub(crate) name: Option<String>,
    pub(crate) loader: Option<Arc<dyn Loader>>,
    pub(crate) action: Option<Arc<dyn Action>>,
    pub(crate) view: Option<ViewRef>,
    pub(crate) children: Vec<Route>,
}

impl Route {
    /// A route matching `path` relative to its parent.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// The root of a tree (`/`).
    pub fn root() -> Self {
        Self::new("/")
    }

    /// An index route: renders at its parent's exact path.
    pub fn index() -> Self {
        Self {
            index: true,
            ..Self::default()
        }
    }

    /// Human name used in place of the generated route path in logs.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn action(mut self, action: Arc<dyn Action>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(ViewRef::new(view));
        self
    }

    pub fn child(mut self, child: Route) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Route>) -> Self {
        self.children.extend(children);
        self
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("index", &self.index)
            .field("name", &self.name)
            .field("has_loader", &self.loader.is_some())
            .field("has_action", &self.action.is_some())
            .field("view", &self.view)
            .field("children", &self.children)
            .finish()
    }
}
