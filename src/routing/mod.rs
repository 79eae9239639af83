//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     Route declaration (route.rs)
//!     → validation.rs (pattern, sibling and chain invariants)
//!     → pattern.rs (declared paths parsed into Segment variants)
//!     → Freeze as immutable RouteTree (tree.rs)
//!
//! Per navigation / submission:
//!     request path
//!     → matcher.rs (recursive descent over the tree)
//!     → Return: MatchContext (chain + params) or NoMatch
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same chain
//! - First declared child wins
//! - Loaders, actions and views are opaque collaborators (handler.rs)

pub mod handler;
pub mod matcher;
pub mod pattern;
pub mod route;
pub mod tree;
pub mod validation;

pub use handler::{action_fn, loader_fn, Action, ActionContext, ActionResult, Loader, LoaderContext, ViewRef};
pub use matcher::{MatchContext, MatchResult, MatchedNode, Params};
pub use pattern::{RoutePattern, Segment};
pub use route::Route;
pub use tree::{BuildError, NodeId, RouteNode, RouteTree};
pub use validation::{validate, ValidationError};
