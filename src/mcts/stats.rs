//! MCTS search statistics for diagnostics and tuning.
//!
//! `Statistics` holds live counters that workers bump concurrently.
//! `SearchStats` is a plain snapshot of them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Running counters shared by all search workers.
///
/// Counters only grow; they persist across runs of the same controller.
#[derive(Debug, Default)]
pub struct Statistics {
    succeeded: AtomicU64,
    failed: AtomicU64,
    nodes_expanded: AtomicU64,
    max_depth: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed pass that descended `depth` edges.
    pub fn record_success(&self, depth: u64) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expansion(&self) {
        self.nodes_expanded.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn succeeded(&self) -> u64 {
        self.succeeded.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn nodes_expanded(&self) -> u64 {
        self.nodes_expanded.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn max_depth(&self) -> u64 {
        self.max_depth.load(Ordering::Relaxed)
    }

    /// Copy the counters, tagging them with `time_us`.
    #[must_use]
    pub fn snapshot(&self, time_us: u64) -> SearchStats {
        SearchStats {
            iterations: self.succeeded(),
            failed: self.failed(),
            nodes_expanded: self.nodes_expanded(),
            max_depth: self.max_depth(),
            time_us,
        }
    }
}

/// Statistics collected during MCTS search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Passes that finished back-propagation.
    pub iterations: u64,

    /// Passes that ended in an error.
    pub failed: u64,

    /// Nodes expanded (added to tree).
    pub nodes_expanded: u64,

    /// Maximum depth reached during search.
    pub max_depth: u64,

    /// Time spent in the last run (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} iterations ({} failed), {} nodes expanded, max depth {}, {:.0} it/s",
            self.iterations,
            self.failed,
            self.nodes_expanded,
            self.max_depth,
            self.iterations_per_second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.nodes_expanded, 0);
    }

    #[test]
    fn test_stats_iterations_per_second() {
        let stats = SearchStats {
            iterations: 1000,
            time_us: 1_000_000,
            ..SearchStats::default()
        };

        assert_eq!(stats.iterations_per_second(), 1000.0);
    }

    #[test]
    fn test_counters_accumulate() {
        let counters = Statistics::new();
        counters.record_success(3);
        counters.record_success(1);
        counters.record_failure();
        counters.record_expansion();

        let stats = counters.snapshot(10);
        assert_eq!(stats.iterations, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.nodes_expanded, 1);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.time_us, 10);
    }

    #[test]
    fn test_concurrent_counters() {
        let counters = Statistics::new();
        std::thread::scope(|s| {
            for depth in 0..4 {
                let counters = &counters;
                s.spawn(move || {
                    for _ in 0..250 {
                        counters.record_success(depth);
                    }
                });
            }
        });
        assert_eq!(counters.succeeded(), 1000);
        assert_eq!(counters.max_depth(), 3);
    }

    #[test]
    fn test_stats_serialization() {
        let stats = SearchStats {
            iterations: 42,
            ..SearchStats::default()
        };

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats, deserialized);
    }
}
