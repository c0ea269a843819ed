//! LibraryCatalog: the borrow/return/delete state machine
//!
//! Per-record states are `Available` and `Borrowed(patron)`. A waitlist is
//! always attached to a record but only matters while it is borrowed.
//! Every precondition is checked before the record is touched, so an
//! `Err` never leaves a half-applied transition behind.

use super::config::CatalogConfig;
use super::errors::{CatalogError, CatalogResult};
use super::outcome::{BorrowOutcome, DeleteOutcome, InsertOutcome, ReturnOutcome};
use super::record::{Availability, BookSnapshot, CatalogRecord};
use crate::index::{IndexResult, Nearest, OrderedIndex};
use crate::observability::{log_event, Event, MetricsRegistry};
use crate::reservation::Reservation;
use crate::{BookId, PatronId, Priority};

/// In-memory book catalog.
///
/// All mutation goes through `&mut self`; a concurrent front end would
/// need to put the whole catalog behind one lock.
#[derive(Debug)]
pub struct LibraryCatalog {
    index: OrderedIndex<CatalogRecord>,
    config: CatalogConfig,
    metrics: MetricsRegistry,
    /// Monotonic stamp handed to each new reservation
    clock: u64,
}

impl Default for LibraryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryCatalog {
    /// Creates an empty catalog with default configuration
    pub fn new() -> Self {
        Self {
            index: OrderedIndex::new(),
            config: CatalogConfig::default(),
            metrics: MetricsRegistry::new(),
            clock: 0,
        }
    }

    /// Creates an empty catalog after validating `config`
    pub fn with_config(config: CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Number of books in the catalog
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rotations and recoloring steps performed by the index so far
    pub fn rotation_count(&self) -> u64 {
        self.index.rotation_count()
    }

    /// Direct access to a record
    pub fn record(&self, book_id: BookId) -> Option<&CatalogRecord> {
        self.index.get(book_id)
    }

    /// Check the underlying index's structural invariants
    pub fn validate(&self) -> IndexResult<()> {
        self.index.validate()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Add a book. An id that is already catalogued is ignored.
    pub fn insert_book(
        &mut self,
        book_id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        available: bool,
    ) -> InsertOutcome {
        if self.index.contains_key(book_id) {
            self.metrics.increment_duplicates_ignored();
            return InsertOutcome::Duplicate;
        }

        let record = CatalogRecord::new(
            book_id,
            title,
            author,
            Availability::from_flag(available),
            self.config.waitlist_capacity,
        );

        match self.index.insert(book_id, record) {
            Ok(_) => {
                self.metrics.increment_books_inserted();
                InsertOutcome::Inserted
            }
            Err(_) => InsertOutcome::Duplicate,
        }
    }

    /// Lend `book_id` to `patron_id`, or queue a reservation if it is out.
    ///
    /// A patron who already holds a reservation gets its priority
    /// overwritten instead of a second entry.
    pub fn borrow_book(
        &mut self,
        patron_id: PatronId,
        book_id: BookId,
        priority: Priority,
    ) -> CatalogResult<BorrowOutcome> {
        let Some(record) = self.index.get_mut(book_id) else {
            self.metrics.increment_not_found();
            return Err(CatalogError::NotFound { book_id });
        };

        if record.availability().is_available() {
            record.lend_to(patron_id);
            self.metrics.increment_borrows();
            return Ok(BorrowOutcome::Borrowed);
        }

        if record.waitlist_mut().update_priority(patron_id, priority) {
            self.metrics.increment_priority_updates();
            return Ok(BorrowOutcome::Reserved);
        }

        let reservation = Reservation::new(book_id, patron_id, priority, self.clock);
        if let Err(err) = record.waitlist_mut().insert(reservation) {
            let capacity = record.waitlist().capacity();
            self.metrics.increment_waitlist_rejections();
            log_event(
                Event::WaitlistFull,
                &[
                    ("book_id", book_id.to_string().as_str()),
                    ("code", err.code()),
                    ("patron_id", patron_id.to_string().as_str()),
                ],
            );
            return Err(CatalogError::CapacityExceeded {
                book_id,
                patron_id,
                capacity,
            });
        }

        self.clock += 1;
        self.metrics.increment_reservations();
        Ok(BorrowOutcome::Reserved)
    }

    /// Take `book_id` back from `patron_id`.
    ///
    /// If anyone is waiting, the lowest priority number is handed the book
    /// immediately and the record stays borrowed.
    pub fn return_book(&mut self, patron_id: PatronId, book_id: BookId) -> CatalogResult<ReturnOutcome> {
        let Some(record) = self.index.get_mut(book_id) else {
            self.metrics.increment_not_found();
            return Err(CatalogError::NotFound { book_id });
        };

        let holder = record.borrowed_by();
        if holder != Some(patron_id) {
            self.metrics.increment_conflicts();
            log_event(
                Event::ReturnConflict,
                &[
                    ("book_id", book_id.to_string().as_str()),
                    ("patron_id", patron_id.to_string().as_str()),
                ],
            );
            return Err(CatalogError::Conflict {
                book_id,
                patron_id,
                holder,
            });
        }

        self.metrics.increment_returns();
        match record.waitlist_mut().extract_min() {
            Ok(next) => {
                record.lend_to(next.patron_id);
                self.metrics.increment_reallotments();
                Ok(ReturnOutcome::Reallotted {
                    next_patron: next.patron_id,
                })
            }
            Err(_) => {
                record.shelve();
                Ok(ReturnOutcome::Returned)
            }
        }
    }

    /// Remove `book_id`, cancelling every pending reservation on it.
    pub fn delete_book(&mut self, book_id: BookId) -> CatalogResult<DeleteOutcome> {
        let Some(record) = self.index.remove(book_id) else {
            self.metrics.increment_not_found();
            return Err(CatalogError::NotFound { book_id });
        };

        let cancelled = record.into_cancellations();
        self.metrics.increment_deletes();
        self.metrics.add_cancellations(cancelled.len() as u64);
        log_event(
            Event::BookDeleted,
            &[
                ("book_id", book_id.to_string().as_str()),
                ("cancelled", cancelled.len().to_string().as_str()),
            ],
        );

        Ok(DeleteOutcome { cancelled })
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// Book(s) closest to `book_id`; equidistant neighbours come back as a tie
    pub fn find_closest(&self, book_id: BookId) -> Nearest<BookSnapshot> {
        self.index.nearest(book_id).map(CatalogRecord::snapshot)
    }

    pub fn print_one(&self, book_id: BookId) -> CatalogResult<BookSnapshot> {
        self.index
            .get(book_id)
            .map(CatalogRecord::snapshot)
            .ok_or(CatalogError::NotFound { book_id })
    }

    /// Books with ids in `[low, high]`, ascending
    pub fn print_range(&self, low: BookId, high: BookId) -> Vec<BookSnapshot> {
        self.index
            .range(low, high)
            .into_iter()
            .map(CatalogRecord::snapshot)
            .collect()
    }

    pub fn print_all(&self) -> Vec<BookSnapshot> {
        self.index.iter().map(CatalogRecord::snapshot).collect()
    }
}
