//! Bounded, append-only ledger of completed predictions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Default number of records retained before FIFO eviction kicks in.
pub const DEFAULT_CAPACITY: usize = 50;

/// Outcome of one successful prediction, as retained for display.
///
/// `timestamp` is request completion time. `symptoms` is the original,
/// pre-trim input. Records are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub timestamp: DateTime<Utc>,
    pub symptoms: String,
    pub prediction: String,
    pub confidence: f64,
}

/// Process-wide, insertion-ordered store of past predictions.
///
/// The ledger never holds more than its capacity: appending at the bound
/// evicts the oldest record first, so no read can observe an over-full
/// sequence. Cloning yields another handle to the same underlying store.
///
/// All access goes through one internal lock, so appends and snapshots are
/// mutually exclusive and `snapshot` is a consistent point-in-time view.
#[derive(Clone)]
pub struct HistoryLedger {
    records: Arc<Mutex<VecDeque<PredictionRecord>>>,
    capacity: usize,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLedger {
    /// Create an empty ledger with the default capacity of 50.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty ledger with a custom capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ledger capacity must be non-zero");
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one first when at capacity.
    pub fn append(&self, record: PredictionRecord) -> Result<(), HistoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| HistoryError::LockPoisoned {
                reason: e.to_string(),
            })?;
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
        Ok(())
    }

    /// All currently retained records, oldest first.
    ///
    /// Callers wanting newest-first display reverse the snapshot themselves.
    pub fn snapshot(&self) -> Result<Vec<PredictionRecord>, HistoryError> {
        let records = self
            .records
            .lock()
            .map_err(|e| HistoryError::LockPoisoned {
                reason: e.to_string(),
            })?;
        Ok(records.iter().cloned().collect())
    }

    /// Number of currently retained records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
