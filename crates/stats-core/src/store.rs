//! Holder for the most recent analysis.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::engine::StatisticsReport;

/// Single-slot store for the latest [`StatisticsReport`].
///
/// Each `put` swaps in a new `Arc` under the write lock, so a concurrent
/// `get` sees either the previous report or the new one, never a mix.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    last: RwLock<Option<Arc<StatisticsReport>>>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored report. No history is kept.
    pub fn put(&self, report: StatisticsReport) -> Arc<StatisticsReport> {
        let report = Arc::new(report);
        // A poisoned lock still holds a whole `Option<Arc<_>>`, so keep using it.
        let mut slot = self.last.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&report));
        debug!(count = report.count, "stored latest analysis");
        report
    }

    /// The latest report, or `None` if nothing has been analysed yet.
    pub fn get(&self) -> Option<Arc<StatisticsReport>> {
        self.last
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    use crate::engine::analyze;
    use crate::sample::NumericSample;

    fn report(values: &[f64]) -> StatisticsReport {
        analyze(&NumericSample::new(values.to_vec()).unwrap())
    }

    #[test]
    fn test_empty_store() {
        let store = AnalysisStore::new();
        assert!(store.is_empty());
        assert!(store.get().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let store = AnalysisStore::new();
        let stored = store.put(report(&[1.0, 2.0, 3.0]));
        let fetched = store.get().unwrap();
        assert_eq!(*fetched, *stored);
        assert_eq!(fetched.count, 3);
    }

    #[test]
    fn test_put_overwrites() {
        let store = AnalysisStore::new();
        store.put(report(&[1.0, 2.0]));
        store.put(report(&[10.0, 20.0, 30.0, 40.0]));

        let latest = store.get().unwrap();
        assert_eq!(latest.count, 4);
        assert_eq!(latest.mean, 25.0);
    }

    #[test]
    fn test_concurrent_readers_see_whole_reports() {
        let store = Arc::new(AnalysisStore::new());
        let small = report(&[1.0, 2.0]);
        let large = report(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let small = small.clone();
                let large = large.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        if i % 2 == 0 {
                            store.put(small.clone());
                        } else {
                            store.put(large.clone());
                        }
                        if let Some(seen) = store.get() {
                            assert!(*seen == small || *seen == large);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(!store.is_empty());
    }
}
