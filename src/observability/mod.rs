//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation controller and submission dispatcher produce:
//!     → tracing events (issue, commit, failure, supersession)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr)
//!     → whatever `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Every navigation carries its sequence number in log fields
//! - Metrics are cheap and can be disabled from config

pub mod logging;
pub mod metrics;
