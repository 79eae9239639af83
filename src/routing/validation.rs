//! Route declaration validation.
//!
//! # Responsibilities
//! - Reject malformed path patterns
//! - Enforce sibling invariants (unique literals, at most one index child)
//! - Enforce unique parameter names along every root-to-leaf chain
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function over the declaration; runs before any tree is built

use std::collections::HashSet;

use crate::routing::pattern::{PatternError, RoutePattern};
use crate::routing::route::Route;

/// A single problem found in a route declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route `{path}`: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: PatternError,
    },

    #[error("index route under `{parent}` declares a path `{path}`")]
    IndexWithPath { parent: String, path: String },

    #[error("index route `{route}` cannot have children")]
    IndexWithChildren { route: String },

    #[error("`{parent}` declares more than one index child")]
    MultipleIndex { parent: String },

    #[error("`{parent}` declares the literal child `{pattern}` more than once")]
    DuplicateLiteral { parent: String, pattern: String },

    #[error("parameter `:{name}` in `{route}` is already bound by an ancestor")]
    DuplicateParam { route: String, name: String },
}

/// Check a declaration tree, collecting every violation.
pub fn validate(root: &Route) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    visit(root, None, &mut Vec::new(), &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse the pattern a declaration stands for.
pub(crate) fn declared_pattern(route: &Route, parent: Option<&str>) -> Result<RoutePattern, ValidationError> {
    if route.index {
        return match route.path.as_deref() {
            None | Some("") => Ok(RoutePattern::Index),
            Some(path) => Err(ValidationError::IndexWithPath {
                parent: parent.unwrap_or("/").to_string(),
                path: path.to_string(),
            }),
        };
    }
    let path = route.path.as_deref().unwrap_or("");
    RoutePattern::parse(path).map_err(|source| ValidationError::InvalidPattern {
        path: path.to_string(),
        source,
    })
}

/// Full route path of a node, e.g. `/config/category`.
pub(crate) fn join_route(parent: Option<&str>, pattern: &RoutePattern) -> String {
    let base = parent.unwrap_or("").trim_end_matches('/');
    match pattern {
        RoutePattern::Index => format!("{}/(index)", base),
        RoutePattern::Segments(segments) if segments.is_empty() => {
            if base.is_empty() {
                "/".to_string()
            } else {
                base.to_string()
            }
        }
        RoutePattern::Segments(_) => format!("{}/{}", base, pattern),
    }
}

fn visit(
    route: &Route,
    parent: Option<&str>,
    chain_params: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) {
    let pattern = match declared_pattern(route, parent) {
        Ok(pattern) => pattern,
        Err(e) => {
            errors.push(e);
            return;
        }
    };
    let full = join_route(parent, &pattern);

    let mut pushed = 0;
    for name in pattern.param_names() {
        if chain_params.iter().any(|bound| bound == name) {
            errors.push(ValidationError::DuplicateParam {
                route: full.clone(),
                name: name.to_string(),
            });
        }
        chain_params.push(name.to_string());
        pushed += 1;
    }

    if pattern.is_index() && !route.children.is_empty() {
        errors.push(ValidationError::IndexWithChildren { route: full.clone() });
    }

    let mut index_children = 0;
    let mut literals = HashSet::new();
    for child in &route.children {
        let Ok(child_pattern) = declared_pattern(child, Some(&full)) else {
            continue;
        };
        if child_pattern.is_index() {
            index_children += 1;
        } else if child_pattern.is_literal() && !literals.insert(child_pattern.to_string()) {
            errors.push(ValidationError::DuplicateLiteral {
                parent: full.clone(),
                pattern: child_pattern.to_string(),
            });
        }
    }
    if index_children > 1 {
        errors.push(ValidationError::MultipleIndex { parent: full.clone() });
    }

    for child in &route.children {
        visit(child, Some(&full), chain_params, errors);
    }

    chain_params.truncate(chain_params.len() - pushed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tree() {
        let root = Route::root().child(
            Route::new("config").child(
                Route::new("category").child(
                    Route::new("contentList/:cid?")
                        .child(Route::index())
                        .child(Route::new("content/:id")),
                ),
            ),
        );
        assert!(validate(&root).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let root = Route::root()
            .child(Route::new("config"))
            .child(Route::new("config"))
            .child(Route::index())
            .child(Route::index())
            .child(Route::new("bad/:"));

        let errors = validate(&root).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::DuplicateLiteral {
            parent: "/".into(),
            pattern: "config".into(),
        }));
        assert!(errors.contains(&ValidationError::MultipleIndex { parent: "/".into() }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidPattern { path, .. } if path == "bad/:")));
    }

    #[test]
    fn test_duplicate_param_along_chain() {
        let root = Route::root().child(Route::new("items/:id").child(Route::new("sub/:id")));
        let errors = validate(&root).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateParam {
                route: "/items/:id/sub/:id".into(),
                name: "id".into(),
            }]
        );
    }

    #[test]
    fn test_same_param_in_sibling_branches_is_fine() {
        let root = Route::root()
            .child(Route::new("a/:id"))
            .child(Route::new("b/:id"));
        assert!(validate(&root).is_ok());
    }

    #[test]
    fn test_index_constraints() {
        let mut bad_index = Route::index().child(Route::new("x"));
        bad_index.path = None;
        let root = Route::root().child(Route::new("list").child(bad_index));
        let errors = validate(&root).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::IndexWithChildren {
                route: "/list/(index)".into()
            }]
        );

        let mut with_path = Route::index();
        with_path.path = Some("oops".into());
        let errors = validate(&Route::root().child(with_path)).unwrap_err();
        assert!(matches!(errors[0], ValidationError::IndexWithPath { .. }));
    }

    #[test]
    fn test_join_route() {
        let root = RoutePattern::parse("/").unwrap();
        assert_eq!(join_route(None, &root), "/");
        let config = RoutePattern::parse("config").unwrap();
        assert_eq!(join_route(Some("/"), &config), "/config");
        assert_eq!(join_route(Some("/config"), &RoutePattern::Index), "/config/(index)");
    }
}
