use std::collections::BTreeSet;

use tracing::{debug, warn};

/// Tracks which of a page's independent fetches have settled.
///
/// A fetch counts as settled whether it succeeded or failed, and fetches may settle
/// in any order. When a fetch settles again (a retry), its latest outcome counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadTracker {
    expected: BTreeSet<String>,
    settled: BTreeSet<String>,
    failed: BTreeSet<String>,
}

impl LoadTracker {
    pub fn new<I, S>(expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expected: expected.into_iter().map(Into::into).collect(),
            settled: BTreeSet::new(),
            failed: BTreeSet::new(),
        }
    }

    pub fn succeeded(&mut self, key: &str) {
        self.settle(key, true);
    }

    pub fn failed(&mut self, key: &str) {
        self.settle(key, false);
    }

    fn settle(&mut self, key: &str, ok: bool) {
        if !self.expected.contains(key) {
            warn!(key, "Settled a fetch that was never expected");
            return;
        }
        self.settled.insert(key.to_string());
        if ok {
            self.failed.remove(key);
        } else {
            self.failed.insert(key.to_string());
        }
        debug!(
            key,
            ok,
            settled = self.settled.len(),
            expected = self.expected.len(),
            "Fetch settled"
        );
    }

    pub fn is_complete(&self) -> bool {
        self.settled.len() == self.expected.len()
    }

    pub fn is_loading(&self) -> bool {
        !self.is_complete()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.expected
            .difference(&self.settled)
            .map(String::as_str)
    }

    /// Forgets every settled fetch, e.g. when the reporting year changes.
    pub fn reset(&mut self) {
        self.settled.clear();
        self.failed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_in_any_order() {
        let keys = ["rows", "funnel", "heatmap"];
        let orders = [
            ["rows", "funnel", "heatmap"],
            ["heatmap", "rows", "funnel"],
            ["funnel", "heatmap", "rows"],
        ];

        for order in orders {
            let mut tracker = LoadTracker::new(keys);
            for (i, key) in order.iter().enumerate() {
                assert!(tracker.is_loading());
                if i == 1 {
                    tracker.failed(key);
                } else {
                    tracker.succeeded(key);
                }
            }
            assert!(tracker.is_complete());
            assert!(tracker.has_failures());
        }
    }

    #[test]
    fn test_duplicates_and_unknown_keys_do_not_count() {
        let mut tracker = LoadTracker::new(["rows", "targets"]);
        tracker.succeeded("rows");
        tracker.succeeded("rows");
        tracker.succeeded("other");
        assert!(!tracker.is_complete());
        assert_eq!(tracker.pending().collect::<Vec<_>>(), vec!["targets"]);

        tracker.succeeded("targets");
        assert!(tracker.is_complete());

        tracker.reset();
        assert!(tracker.is_loading());
        assert!(!tracker.has_failures());
    }

    #[test]
    fn test_successful_retry_clears_failure() {
        let mut tracker = LoadTracker::new(["rows", "targets"]);
        tracker.succeeded("targets");
        tracker.failed("rows");
        assert!(tracker.is_complete());
        assert!(tracker.has_failures());

        tracker.succeeded("rows");
        assert!(tracker.is_complete());
        assert!(!tracker.has_failures());

        tracker.failed("targets");
        assert!(tracker.has_failures());
    }

    #[test]
    fn test_nothing_expected_is_complete() {
        let tracker = LoadTracker::new(Vec::<String>::new());
        assert!(tracker.is_complete());
    }
}
