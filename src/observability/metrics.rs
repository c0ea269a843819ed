//! Catalog metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Read-only views never touch it

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for one catalog instance.
///
/// Atomics let `&self` callers count without a lock; `Relaxed` is enough
/// since counters are independent.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    books_inserted: AtomicU64,
    duplicates_ignored: AtomicU64,
    borrows: AtomicU64,
    reservations: AtomicU64,
    priority_updates: AtomicU64,
    returns: AtomicU64,
    reallotments: AtomicU64,
    deletes: AtomicU64,
    cancellations: AtomicU64,
    waitlist_rejections: AtomicU64,
    not_found: AtomicU64,
    conflicts: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_books_inserted(&self) {
        self.books_inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_duplicates_ignored(&self) {
        self.duplicates_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_borrows(&self) {
        self.borrows.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reservations(&self) {
        self.reservations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_priority_updates(&self) {
        self.priority_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_returns(&self) {
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reallotments(&self) {
        self.reallotments.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deletes(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Add the number of reservations cancelled by a delete
    pub fn add_cancellations(&self, count: u64) {
        self.cancellations.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_waitlist_rejections(&self) {
        self.waitlist_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_conflicts(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            books_inserted: self.books_inserted.load(Ordering::Relaxed),
            duplicates_ignored: self.duplicates_ignored.load(Ordering::Relaxed),
            borrows: self.borrows.load(Ordering::Relaxed),
            reservations: self.reservations.load(Ordering::Relaxed),
            priority_updates: self.priority_updates.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            reallotments: self.reallotments.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
            waitlist_rejections: self.waitlist_rejections.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object string
    pub fn to_json(&self) -> String {
        // MetricsSnapshot is plain integers; serialization cannot fail
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub books_inserted: u64,
    pub duplicates_ignored: u64,
    pub borrows: u64,
    pub reservations: u64,
    pub priority_updates: u64,
    pub returns: u64,
    pub reallotments: u64,
    pub deletes: u64,
    pub cancellations: u64,
    pub waitlist_rejections: u64,
    pub not_found: u64,
    pub conflicts: u64,
}
