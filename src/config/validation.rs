//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes reference registered loaders/actions)
//! - Validate value ranges (history and event buffers > 0)
//! - Run the route-tree invariants over the declared tree
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<Route, Vec<ConfigValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::collaborators::Collaborators;
use crate::config::schema::RouterConfig;
use crate::routing::{validate, Route, ValidationError};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("navigation.history_limit must be greater than 0")]
    ZeroHistoryLimit,

    #[error("navigation.event_capacity must be greater than 0")]
    ZeroEventCapacity,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("route `{route}` references unknown loader `{name}`")]
    UnknownLoader { route: String, name: String },

    #[error("route `{route}` references unknown action `{name}`")]
    UnknownAction { route: String, name: String },

    #[error(transparent)]
    Route(#[from] ValidationError),
}

/// Check a parsed config against the collaborators the host registered.
pub fn validate_config(
    config: &RouterConfig,
    collaborators: &Collaborators,
) -> Result<(), Vec<ConfigValidationError>> {
    resolve_config(config, collaborators).map(|_| ())
}

/// Validate a config and return its declared tree as a `Route`.
///
/// The declaration is converted once; the same conversion is both checked
/// and handed back for `RouteTree::build`.
pub fn resolve_config(
    config: &RouterConfig,
    collaborators: &Collaborators,
) -> Result<Route, Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if config.navigation.history_limit == 0 {
        errors.push(ConfigValidationError::ZeroHistoryLimit);
    }
    if config.navigation.event_capacity == 0 {
        errors.push(ConfigValidationError::ZeroEventCapacity);
    }
    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let route = collaborators.convert(&config.root, "", &mut errors);
    if let Err(route_errors) = validate(&route) {
        errors.extend(route_errors.into_iter().map(ConfigValidationError::from));
    }

    if errors.is_empty() {
        Ok(route)
    } else {
        Err(errors)
    }
}
