//! Hierarchical router with co-located data resolution.
//!
//! # Architecture Overview
//!
//! ```text
//!     navigate(path)                           submit(path, payload, method)
//!     ──────────────┐                          ──────────────┐
//!                   ▼                                        ▼
//!          ┌──────────────────┐                  ┌──────────────────────┐
//!          │    navigation    │◀─────────────────│      submission      │
//!          │    controller    │   re-navigate    │      dispatcher      │
//!          └────────┬─────────┘                  └──────────┬───────────┘
//!                   │ match_path                            │ match_path
//!                   ▼                                       ▼
//!          ┌──────────────────────────────────────────────────────────┐
//!          │              routing: RouteTree + matcher                │
//!          └──────────────────────────────────────────────────────────┘
//!                   │ loaders (concurrent)                  │ action (deepest)
//!                   ▼                                       ▼
//!              host collaborators: Loader / Action / ViewRef
//!
//!          config (TOML → Route)      observability (tracing + metrics)
//! ```

pub mod config;
pub mod error;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod submission;

pub use config::{Collaborators, RouterConfig};
pub use error::{BoxError, RouterError, RouterResult};
pub use navigation::{NavigationController, NavigationOutcome, NavigationState};
pub use routing::{Route, RouteTree};
pub use submission::{SubmissionDispatcher, SubmissionMethod, SubmissionResult};
