use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::domain::entities::ingestion_record::IngestionRecord;

/// Default number of ingestion records kept in memory.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Fixed-capacity log of ingestion records, newest first.
///
/// Records are shared as `Arc` so a snapshot only copies pointers while the
/// lock is held.
pub struct HistoryRing {
    capacity: usize,
    records: Mutex<VecDeque<Arc<IngestionRecord>>>,
}

impl HistoryRing {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Prepend a record, evicting the oldest once the ring is full.
    pub fn append(&self, record: IngestionRecord) -> Arc<IngestionRecord> {
        let record = Arc::new(record);
        let mut records = self.records.lock();
        if records.len() == self.capacity {
            records.pop_back();
        }
        records.push_front(Arc::clone(&record));
        record
    }

    /// Point-in-time copy, newest first.
    pub fn snapshot(&self) -> Vec<Arc<IngestionRecord>> {
        self.records.lock().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Arc<IngestionRecord>> {
        self.records.lock().front().cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ingestion_record::{ParseOutcome, RequestMeta};
    use std::thread;

    fn record(n: usize) -> IngestionRecord {
        IngestionRecord::new(
            format!("10.0.0.{}", n),
            RequestMeta::default(),
            n.to_string(),
            ParseOutcome::Failed {
                reason: "test".to_string(),
                detail: String::new(),
            },
            None,
        )
    }

    #[test]
    fn test_empty_ring() {
        let ring = HistoryRing::new(3);
        assert!(ring.is_empty());
        assert!(ring.snapshot().is_empty());
        assert!(ring.latest().is_none());
    }

    #[test]
    fn test_snapshot_len_is_min_of_appends_and_capacity() {
        for capacity in [1, 3, 50] {
            for n in 0..(capacity * 2 + 1) {
                let ring = HistoryRing::new(capacity);
                for i in 0..n {
                    ring.append(record(i));
                }
                let snapshot = ring.snapshot();
                assert_eq!(snapshot.len(), n.min(capacity));
                if n > 0 {
                    assert_eq!(snapshot[0].raw_body, (n - 1).to_string());
                }
            }
        }
    }

    #[test]
    fn test_newest_first_and_oldest_evicted() {
        let ring = HistoryRing::new(3);
        for i in 0..5 {
            ring.append(record(i));
        }
        let bodies: Vec<String> = ring.snapshot().iter().map(|r| r.raw_body.clone()).collect();
        assert_eq!(bodies, vec!["4", "3", "2"]);
        assert_eq!(ring.latest().unwrap().raw_body, "4");
    }

    #[test]
    fn test_snapshot_is_not_live() {
        let ring = HistoryRing::new(5);
        ring.append(record(0));
        let snapshot = ring.snapshot();
        ring.append(record(1));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let ring = HistoryRing::new(0);
        assert_eq!(ring.capacity(), 1);
        ring.append(record(0));
        ring.append(record(1));
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(HistoryRing::default().capacity(), 50);
    }

    #[test]
    fn test_concurrent_appends_stay_bounded() {
        let ring = Arc::new(HistoryRing::new(10));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let ring = Arc::clone(&ring);
                thread::spawn(move || {
                    for i in 0..100 {
                        ring.append(record(t * 1000 + i));
                        assert!(ring.snapshot().len() <= 10);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(ring.len(), 10);
    }
}
