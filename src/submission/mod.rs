//! Submission subsystem.
//!
//! # Data Flow
//! ```text
//! submit(path, payload, method)
//!     → RouteTree::match_path
//!     → deepest node in the chain declaring an action
//!     → Action::act
//!     → on success: NavigationController::navigate(redirect or path)
//!     → on failure: Err(RouterError::Action), no navigation
//! ```

pub mod dispatcher;

pub use dispatcher::{SubmissionDispatcher, SubmissionResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of mutation being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMethod {
    Create,
    Update,
    Delete,
}

impl SubmissionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionMethod::Create => "create",
            SubmissionMethod::Update => "update",
            SubmissionMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for SubmissionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(SubmissionMethod::Create),
            "update" => Ok(SubmissionMethod::Update),
            "delete" => Ok(SubmissionMethod::Delete),
            other => Err(format!("unknown submission method `{}`", other)),
        }
    }
}
