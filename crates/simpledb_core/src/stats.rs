//! Store statistics.
//!
//! Counters are updated on every protocol-level operation so a front end
//! can report what a session did.
//!
//! ```rust
//! use simpledb_core::Store;
//!
//! let mut store = Store::new();
//! store.set("a", "1").unwrap();
//! let _ = store.get("a");
//!
//! assert_eq!(store.stats().writes(), 1);
//! assert_eq!(store.stats().reads(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a [`Store`](crate::Store).
///
/// Counters are atomic so read-only queries can record themselves through
/// a shared reference. Values only ever increase.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// `GET` operations.
    reads: AtomicU64,
    /// `SET` operations.
    writes: AtomicU64,
    /// `UNSET` operations.
    unsets: AtomicU64,
    /// `NUMEQUALTO` operations.
    count_queries: AtomicU64,
    /// `BEGIN` operations.
    transactions_begun: AtomicU64,
    /// Successful `COMMIT` operations.
    transactions_committed: AtomicU64,
    /// Successful `ROLLBACK` operations.
    transactions_rolled_back: AtomicU64,
    /// Rejected operations.
    errors: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unset(&self) {
        self.unsets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count_query(&self) {
        self.count_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rejected operation.
    ///
    /// Public so the command layer can count protocol errors that never
    /// reach the store.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of `GET` operations.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of `SET` operations.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the number of `UNSET` operations.
    pub fn unsets(&self) -> u64 {
        self.unsets.load(Ordering::Relaxed)
    }

    /// Returns the number of `NUMEQUALTO` operations.
    pub fn count_queries(&self) -> u64 {
        self.count_queries.load(Ordering::Relaxed)
    }

    /// Returns the number of transactions begun.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the number of successful commits.
    ///
    /// One `COMMIT` closes every open layer but counts once.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of successful rollbacks.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected operations.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Takes a point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            writes: self.writes(),
            unsets: self.unsets(),
            count_queries: self.count_queries(),
            transactions_begun: self.transactions_begun(),
            transactions_committed: self.transactions_committed(),
            transactions_rolled_back: self.transactions_rolled_back(),
            errors: self.errors(),
        }
    }
}

/// Plain copy of [`StoreStats`] counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct StatsSnapshot {
    pub reads: u64,
    pub writes: u64,
    pub unsets: u64,
    pub count_queries: u64,
    pub transactions_begun: u64,
    pub transactions_committed: u64,
    pub transactions_rolled_back: u64,
    pub errors: u64,
}
