//! Metrics collection.
//!
//! # Responsibilities
//! - Define router metrics (navigations, loaders, supersession, submissions)
//! - Record through the `metrics` facade; installing an exporter is up to the host
//!
//! # Metrics
//! - `navtree_navigations_total` (counter): navigations by outcome
//! - `navtree_navigation_duration_seconds` (histogram): issue to commit/discard
//! - `navtree_loader_duration_seconds` (histogram): per loader, by route and result
//! - `navtree_superseded_total` (counter): cascades whose results were dropped
//! - `navtree_submissions_total` (counter): submissions by method and outcome
//!
//! # Design Decisions
//! - A global switch (`observability.metrics_enabled`) turns recording off
//! - Labels stay low-cardinality: declared route paths, never request paths

use ::metrics::{counter, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn metric recording on or off.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_navigation(outcome: &'static str, started: Instant) {
    if !enabled() {
        return;
    }
    counter!("navtree_navigations_total", "outcome" => outcome).increment(1);
    histogram!("navtree_navigation_duration_seconds", "outcome" => outcome)
        .record(started.elapsed().as_secs_f64());
}

pub fn record_loader(route: &str, ok: bool, started: Instant) {
    if !enabled() {
        return;
    }
    let result = if ok { "ok" } else { "error" };
    histogram!(
        "navtree_loader_duration_seconds",
        "route" => route.to_string(),
        "result" => result
    )
    .record(started.elapsed().as_secs_f64());
}

pub fn record_superseded() {
    if !enabled() {
        return;
    }
    counter!("navtree_superseded_total").increment(1);
}

pub fn record_submission(method: &'static str, outcome: &'static str) {
    if !enabled() {
        return;
    }
    counter!("navtree_submissions_total", "method" => method, "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::metrics::{
        with_local_recorder, Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder,
        SharedString, Unit,
    };
    use std::sync::atomic::AtomicUsize;

    /// Counts metric registrations; every handle it returns is a no-op.
    #[derive(Default)]
    struct CountingRecorder {
        registered: AtomicUsize,
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            self.registered.fetch_add(1, Ordering::SeqCst);
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            self.registered.fetch_add(1, Ordering::SeqCst);
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            self.registered.fetch_add(1, Ordering::SeqCst);
            Histogram::noop()
        }
    }

    #[test]
    fn test_disabled_switch_skips_recording() {
        let recorder = CountingRecorder::default();

        with_local_recorder(&recorder, || {
            record_submission("update", "ok");
            record_superseded();
        });
        assert_eq!(recorder.registered.load(Ordering::SeqCst), 2);

        set_enabled(false);
        with_local_recorder(&recorder, || {
            record_submission("update", "ok");
            record_superseded();
            record_navigation("loaded", Instant::now());
            record_loader("/config", true, Instant::now());
        });
        set_enabled(true);
        assert_eq!(recorder.registered.load(Ordering::SeqCst), 2);
    }
}
