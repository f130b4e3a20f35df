//! Split statistics and the observers that receive them.
//!
//! Observers are told how many items each split received once a split has
//! been computed. They only see a copy of the statistics, so they can never
//! change the assignment itself.

use std::fmt;

use serde::Serialize;
use tracing::info;

/// Outcome of a split for one named partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitStats<S> {
    /// Split name.
    pub name: S,

    /// Number of items assigned to the split.
    pub count: usize,

    /// `count / total`, or 0 when nothing was assigned.
    pub effective_ratio: f64,

    /// Normalized proportion the split asked for.
    pub expected: f64,
}

/// Count each split's share of `output`.
///
/// Duplicate names in `splits` each report the combined count of that name.
pub fn compute_stats<S: Clone + PartialEq>(
    output: &[S],
    splits: &[(S, f64)],
) -> Vec<SplitStats<S>> {
    let total = output.len();

    splits
        .iter()
        .map(|(name, expected)| {
            let count = output.iter().filter(|assigned| *assigned == name).count();
            let effective_ratio = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            };

            SplitStats {
                name: name.clone(),
                count,
                effective_ratio,
                expected: *expected,
            }
        })
        .collect()
}

/// Receives statistics after every split.
pub trait SplitObserver<S> {
    /// Called once per split call with one entry per configured split.
    fn on_stats(&mut self, stats: &[SplitStats<S>]);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<S> SplitObserver<S> for NoopObserver {
    fn on_stats(&mut self, _stats: &[SplitStats<S>]) {}
}

/// Observer that logs one `info` event per split.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<S: fmt::Display> SplitObserver<S> for TracingObserver {
    fn on_stats(&mut self, stats: &[SplitStats<S>]) {
        for entry in stats {
            info!(
                split = %entry.name,
                count = entry.count,
                effective_ratio = entry.effective_ratio,
                expected = entry.expected,
                "split assigned"
            );
        }
    }
}

/// Observer that keeps the most recent statistics.
#[derive(Debug, Clone)]
pub struct StatsCollector<S> {
    stats: Vec<SplitStats<S>>,
}

impl<S> Default for StatsCollector<S> {
    fn default() -> Self {
        Self { stats: Vec::new() }
    }
}

impl<S> StatsCollector<S> {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics from the last split, empty if none ran yet.
    pub fn stats(&self) -> &[SplitStats<S>] {
        &self.stats
    }

    /// Take ownership of the collected statistics.
    pub fn into_stats(self) -> Vec<SplitStats<S>> {
        self.stats
    }
}

impl<S: Clone> SplitObserver<S> for StatsCollector<S> {
    fn on_stats(&mut self, stats: &[SplitStats<S>]) {
        self.stats = stats.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_stats() {
        let output = vec!["train", "train", "test", "train"];
        let stats = compute_stats(&output, &[("train", 0.7), ("test", 0.2), ("dev", 0.1)]);

        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].effective_ratio, 0.75);
        assert_eq!(stats[1].count, 1);
        assert_eq!(stats[2].count, 0);
        assert_eq!(stats[2].effective_ratio, 0.0);
        assert_eq!(stats[2].expected, 0.1);
    }

    #[test]
    fn test_compute_stats_empty_output() {
        let stats = compute_stats::<&str>(&[], &[("all", 1.0)]);
        assert_eq!(stats[0].count, 0);
        assert_eq!(stats[0].effective_ratio, 0.0);
    }

    #[test]
    fn test_collector_keeps_last() {
        let mut collector = StatsCollector::new();
        collector.on_stats(&compute_stats(&["a"], &[("a", 1.0)]));
        collector.on_stats(&compute_stats(&["b", "b"], &[("b", 1.0)]));

        assert_eq!(collector.stats().len(), 1);
        assert_eq!(collector.stats()[0].name, "b");
        assert_eq!(collector.into_stats()[0].count, 2);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = compute_stats(&["a", "b"], &[("a", 0.5), ("b", 0.5)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json[0]["name"], "a");
        assert_eq!(json[1]["count"], 1);
        assert_eq!(json[1]["effective_ratio"], 0.5);
    }
}
