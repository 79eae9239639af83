//! Name → handle registry for config-declared routes.
//!
//! A TOML declaration names its loaders and actions by string. The host
//! registers the implementations under those names and the registry turns a
//! `RouteDecl` into a `Route` the tree builder accepts.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::RouteDecl;
use crate::config::validation::ConfigValidationError;
use crate::routing::{Action, Loader, Route};

/// Loaders and actions available to a config file.
#[derive(Clone, Default)]
pub struct Collaborators {
    loaders: HashMap<String, Arc<dyn Loader>>,
    actions: HashMap<String, Arc<dyn Action>>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(mut self, name: impl Into<String>, loader: Arc<dyn Loader>) -> Self {
        self.register_loader(name, loader);
        self
    }

    pub fn with_action(mut self, name: impl Into<String>, action: Arc<dyn Action>) -> Self {
        self.register_action(name, action);
        self
    }

    /// Register a loader, replacing any previous one with the same name.
    pub fn register_loader(&mut self, name: impl Into<String>, loader: Arc<dyn Loader>) {
        self.loaders.insert(name.into(), loader);
    }

    pub fn register_action(&mut self, name: impl Into<String>, action: Arc<dyn Action>) {
        self.actions.insert(name.into(), action);
    }

    pub fn loader(&self, name: &str) -> Option<&Arc<dyn Loader>> {
        self.loaders.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(name)
    }

    /// Convert a declaration into a `Route`, failing on any unknown name.
    pub fn resolve(&self, decl: &RouteDecl) -> Result<Route, Vec<ConfigValidationError>> {
        let mut errors = Vec::new();
        let route = self.convert(decl, "", &mut errors);
        if errors.is_empty() {
            Ok(route)
        } else {
            Err(errors)
        }
    }

    /// Convert, leaving unknown handlers unset and reporting them in `errors`.
    pub(crate) fn convert(
        &self,
        decl: &RouteDecl,
        parent: &str,
        errors: &mut Vec<ConfigValidationError>,
    ) -> Route {
        let location = decl_location(decl, parent);

        let mut route = if decl.index {
            Route {
                path: decl.path.clone(),
                ..Route::index()
            }
        } else {
            Route {
                path: Some(decl.path.clone().unwrap_or_default()),
                ..Route::default()
            }
        };
        if let Some(name) = &decl.name {
            route = route.name(name.clone());
        }
        if let Some(view) = &decl.view {
            route = route.view(view.clone());
        }

        if let Some(name) = &decl.loader {
            match self.loader(name) {
                Some(loader) => route = route.loader(loader.clone()),
                None => errors.push(ConfigValidationError::UnknownLoader {
                    route: location.clone(),
                    name: name.clone(),
                }),
            }
        }
        if let Some(name) = &decl.action {
            match self.action(name) {
                Some(action) => route = route.action(action.clone()),
                None => errors.push(ConfigValidationError::UnknownAction {
                    route: location.clone(),
                    name: name.clone(),
                }),
            }
        }

        route.children(
            decl.children
                .iter()
                .map(|child| self.convert(child, &location, errors)),
        )
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut loaders: Vec<_> = self.loaders.keys().collect();
        let mut actions: Vec<_> = self.actions.keys().collect();
        loaders.sort();
        actions.sort();
        f.debug_struct("Collaborators")
            .field("loaders", &loaders)
            .field("actions", &actions)
            .finish()
    }
}

/// Human-readable position of a declaration, for error messages.
fn decl_location(decl: &RouteDecl, parent: &str) -> String {
    let base = parent.trim_end_matches('/');
    if decl.index {
        return format!("{}/(index)", base);
    }
    let path = decl.path.as_deref().unwrap_or("").trim_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => base.to_string(),
        _ => format!("{}/{}", base, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{action_fn, loader_fn, ActionResult, RouteTree};
    use serde_json::json;

    fn decl() -> RouteDecl {
        RouteDecl {
            children: vec![RouteDecl {
                path: Some("config".into()),
                loader: Some("config".into()),
                action: Some("save".into()),
                children: vec![RouteDecl {
                    path: None,
                    index: true,
                    view: Some("welcome".into()),
                    ..RouteDecl::default()
                }],
                ..RouteDecl::default()
            }],
            ..RouteDecl::default()
        }
    }

    #[test]
    fn test_resolve_builds_tree() {
        let collaborators = Collaborators::new()
            .with_loader("config", loader_fn(|_| async { Ok(json!(1)) }))
            .with_action("save", action_fn(|_| async { Ok(ActionResult::default()) }));

        let route = collaborators.resolve(&decl()).unwrap();
        let tree = RouteTree::build(route).unwrap();
        let config = tree.find("/config").unwrap();
        assert!(config.loader().is_some());
        assert!(config.action().is_some());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_resolve_reports_every_unknown_name() {
        let errors = Collaborators::new().resolve(&decl()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ConfigValidationError::UnknownLoader {
                    route: "/config".into(),
                    name: "config".into(),
                },
                ConfigValidationError::UnknownAction {
                    route: "/config".into(),
                    name: "save".into(),
                },
            ]
        );
    }

    #[test]
    fn test_decl_location() {
        assert_eq!(decl_location(&RouteDecl::default(), ""), "/");
        let child = RouteDecl {
            path: Some("contentList/:cid?".into()),
            ..RouteDecl::default()
        };
        assert_eq!(decl_location(&child, "/config/category"), "/config/category/contentList/:cid?");
    }
}
