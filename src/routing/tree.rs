//! Immutable route tree.
//!
//! # Responsibilities
//! - Validate a declaration and freeze it into an arena of `RouteNode`s
//! - Resolve `NodeId`s to nodes for the matcher, controller and dispatcher
//!
//! # Design Decisions
//! - Built once at startup, never mutated; shared via `Arc<RouteTree>`
//! - Children keep declaration order (it is the tie-break order)

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::routing::handler::{Action, Loader, ViewRef};
use crate::routing::pattern::RoutePattern;
use crate::routing::route::Route;
use crate::routing::validation::{declared_pattern, join_route, validate, ValidationError};

/// Index of a node inside its `RouteTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One frozen segment of the navigation tree.
pub struct RouteNode {
    id: NodeId,
    parent: Option<NodeId>,
    pattern: RoutePattern,
    route: String,
    name: Option<String>,
    loader: Option<Arc<dyn Loader>>,
    action: Option<Arc<dyn Action>>,
    view: Option<ViewRef>,
    children: Vec<NodeId>,
}

impl RouteNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Full declared path, e.g. `/config/category/contentList/:cid?`.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Declared name, falling back to the route path.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.route)
    }

    pub fn loader(&self) -> Option<&Arc<dyn Loader>> {
        self.loader.as_ref()
    }

    pub fn action(&self) -> Option<&Arc<dyn Action>> {
        self.action.as_ref()
    }

    pub fn view(&self) -> Option<&ViewRef> {
        self.view.as_ref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("id", &self.id)
            .field("route", &self.route)
            .field("pattern", &self.pattern)
            .field("has_loader", &self.loader.is_some())
            .field("has_action", &self.action.is_some())
            .field("view", &self.view)
            .field("children", &self.children)
            .finish()
    }
}

/// The route declaration was rejected.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid route declaration: {}", join_errors(.0))]
pub struct BuildError(pub Vec<ValidationError>);

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The frozen navigation tree.
#[derive(Debug)]
pub struct RouteTree {
    nodes: Vec<RouteNode>,
}

impl RouteTree {
    /// Validate `root` and freeze it.
    pub fn build(root: Route) -> Result<Self, BuildError> {
        validate(&root).map_err(BuildError)?;

        let mut nodes = Vec::new();
        insert(&mut nodes, root, None)?;

        tracing::debug!(nodes = nodes.len(), "Route tree built");
        Ok(Self { nodes })
    }

    pub fn root(&self) -> &RouteNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&RouteNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in depth-first declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &RouteNode> {
        self.nodes.iter()
    }

    /// Find a node by its full route path or declared name.
    pub fn find(&self, route: &str) -> Option<&RouteNode> {
        self.nodes
            .iter()
            .find(|n| n.route == route || n.name.as_deref() == Some(route))
    }

    /// Depth of a node (root is 0).
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cursor = self.get(id).and_then(RouteNode::parent);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.get(parent).and_then(RouteNode::parent);
        }
        depth
    }
}

impl Index<NodeId> for RouteTree {
    type Output = RouteNode;

    fn index(&self, id: NodeId) -> &RouteNode {
        &self.nodes[id.0]
    }
}

fn insert(nodes: &mut Vec<RouteNode>, route: Route, parent: Option<NodeId>) -> Result<NodeId, BuildError> {
    let parent_route = parent.map(|p| nodes[p.0].route.clone());
    let pattern = declared_pattern(&route, parent_route.as_deref()).map_err(|e| BuildError(vec![e]))?;
    let id = NodeId(nodes.len());

    nodes.push(RouteNode {
        id,
        parent,
        route: join_route(parent_route.as_deref(), &pattern),
        pattern,
        name: route.name,
        loader: route.loader,
        action: route.action,
        view: route.view,
        children: Vec::new(),
    });

    for child in route.children {
        let child_id = insert(nodes, child, Some(id))?;
        nodes[id.0].children.push(child_id);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::loader_fn;
    use serde_json::json;

    fn sample() -> Route {
        Route::root().view("home").child(
            Route::new("config")
                .view("config")
                .child(
                    Route::new("category")
                        .name("category")
                        .loader(loader_fn(|_| async { Ok(json!([])) }))
                        .child(Route::new("contentList/:cid?").child(Route::index())),
                ),
        )
    }

    #[test]
    fn test_build_flattens_in_declaration_order() {
        let tree = RouteTree::build(sample()).unwrap();
        let routes: Vec<&str> = tree.nodes().map(RouteNode::route).collect();
        assert_eq!(
            routes,
            vec![
                "/",
                "/config",
                "/config/category",
                "/config/category/contentList/:cid?",
                "/config/category/contentList/:cid?/(index)",
            ]
        );
        assert_eq!(tree.root().children(), &[NodeId(1)]);
        assert_eq!(tree[NodeId(2)].parent(), Some(NodeId(1)));
        assert_eq!(tree.depth(NodeId(4)), 4);
        assert_eq!(tree.len(), 5);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_find_by_route_and_name() {
        let tree = RouteTree::build(sample()).unwrap();
        let by_name = tree.find("category").unwrap();
        let by_route = tree.find("/config/category").unwrap();
        assert_eq!(by_name.id(), by_route.id());
        assert!(by_name.loader().is_some());
        assert_eq!(by_name.label(), "category");
        assert_eq!(tree.root().view().map(ViewRef::as_str), Some("home"));
    }

    #[test]
    fn test_build_rejects_invalid() {
        let root = Route::root().child(Route::new("a")).child(Route::new("a"));
        let err = RouteTree::build(root).unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert!(err.to_string().contains("more than once"));
    }
}
