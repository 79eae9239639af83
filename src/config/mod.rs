//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks against registered collaborators)
//!     → RouterConfig (validated, immutable)
//!     → collaborators.rs resolves the declared tree into a Route
//!     → RouteTree::build, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload of the route tree
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod collaborators;
pub mod loader;
pub mod schema;
pub mod validation;

pub use collaborators::Collaborators;
pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::{NavigationConfig, ObservabilityConfig, RouteDecl, RouterConfig};
pub use validation::{resolve_config, validate_config, ConfigValidationError};
