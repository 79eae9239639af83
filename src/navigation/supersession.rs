//! Supersession signal handed to loaders.
//!
//! Every navigation gets a monotonically increasing sequence number. The
//! controller publishes the latest issued number on a `watch` channel; a
//! cascade is superseded as soon as that number moves past its own.

use tokio::sync::watch;

/// Lets a loader observe that its navigation is no longer the latest.
#[derive(Debug, Clone)]
pub struct Supersession {
    seq: u64,
    latest: watch::Receiver<u64>,
}

impl Supersession {
    pub(crate) fn new(seq: u64, latest: watch::Receiver<u64>) -> Self {
        Self { seq, latest }
    }

    /// Sequence number of the navigation this token belongs to.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_superseded(&self) -> bool {
        *self.latest.borrow() != self.seq
    }

    /// Resolves once a newer navigation is issued (or the controller is gone).
    pub async fn superseded(&self) {
        let mut latest = self.latest.clone();
        let seq = self.seq;
        let _ = latest.wait_for(|current| *current != seq).await;
    }
}
