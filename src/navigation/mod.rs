//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path)
//!     → controller.rs issues seq N, publishes Loading(N, path)
//!     → RouteTree::match_path
//!     → loaders of the matched chain run concurrently (join_all)
//!     → commit Loaded / Failed only if N is still the latest seq
//!     → history.rs records the committed location
//!     → state.rs snapshot swapped in and broadcast to subscribers
//! ```
//!
//! # Design Decisions
//! - One current state; replaced atomically, never mutated in place
//! - Last request wins; superseded cascades are not aborted, their results
//!   are dropped (supersession.rs lets loaders notice and stop early)
//! - No loader result caching: every navigation runs a fresh cascade

pub mod controller;
pub mod history;
pub mod state;
pub mod supersession;

pub use controller::{NavigationController, NavigationOutcome};
pub use history::NavigationKind;
pub use state::{LoaderResults, NavigationState};
pub use supersession::Supersession;
