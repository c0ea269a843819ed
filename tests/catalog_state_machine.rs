//! Catalog State Machine Tests
//!
//! Tests for borrow/return/delete transitions:
//! - Availability and holder stay consistent
//! - Waitlists hand books over by priority
//! - Failures never mutate the catalog

use librarium::catalog::{
    Availability, BorrowOutcome, CatalogConfig, CatalogError, InsertOutcome, LibraryCatalog,
    ReturnOutcome,
};
use librarium::index::Nearest;

// =============================================================================
// Helper Functions
// =============================================================================

fn catalog_with(ids: &[i64]) -> LibraryCatalog {
    let mut catalog = LibraryCatalog::new();
    for &id in ids {
        catalog.insert_book(id, format!("Title {}", id), "Author", true);
    }
    catalog
}

// =============================================================================
// Borrow / Return
// =============================================================================

/// Borrow then return with nobody waiting puts the book back on the shelf.
#[test]
fn test_borrow_return_round_trip() {
    let mut catalog = catalog_with(&[1]);

    assert_eq!(catalog.borrow_book(10, 1, 3), Ok(BorrowOutcome::Borrowed));
    let record = catalog.record(1).unwrap();
    assert_eq!(record.availability(), Availability::Borrowed);
    assert_eq!(record.borrowed_by(), Some(10));

    assert_eq!(catalog.return_book(10, 1), Ok(ReturnOutcome::Returned));
    let record = catalog.record(1).unwrap();
    assert_eq!(record.availability(), Availability::Available);
    assert_eq!(record.borrowed_by(), None);
}

/// The lowest priority number is allotted the returned book.
#[test]
fn test_return_hands_over_by_priority() {
    let mut catalog = catalog_with(&[7]);
    catalog.borrow_book(1, 7, 5).unwrap();

    assert_eq!(catalog.borrow_book(2, 7, 2), Ok(BorrowOutcome::Reserved));
    assert_eq!(catalog.borrow_book(3, 7, 1), Ok(BorrowOutcome::Reserved));

    assert_eq!(
        catalog.return_book(1, 7),
        Ok(ReturnOutcome::Reallotted { next_patron: 3 })
    );
    assert_eq!(catalog.record(7).unwrap().borrowed_by(), Some(3));

    assert_eq!(
        catalog.return_book(3, 7),
        Ok(ReturnOutcome::Reallotted { next_patron: 2 })
    );
    assert_eq!(catalog.return_book(2, 7), Ok(ReturnOutcome::Returned));
}

/// Re-reserving overwrites the priority instead of queueing twice.
#[test]
fn test_re_reserve_updates_priority() {
    let mut catalog = catalog_with(&[4]);
    catalog.borrow_book(1, 4, 1).unwrap();
    catalog.borrow_book(2, 4, 5).unwrap();
    catalog.borrow_book(3, 4, 3).unwrap();
    catalog.borrow_book(2, 4, 1).unwrap();

    let record = catalog.record(4).unwrap();
    assert_eq!(record.waitlist().len(), 2);
    assert!(record.waitlist().is_heap_ordered());

    assert_eq!(
        catalog.return_book(1, 4),
        Ok(ReturnOutcome::Reallotted { next_patron: 2 })
    );
}

/// Returning a book the patron does not hold is a conflict.
#[test]
fn test_return_by_non_holder_conflicts() {
    let mut catalog = catalog_with(&[1, 2]);
    catalog.borrow_book(10, 1, 1).unwrap();

    let err = catalog.return_book(11, 1).unwrap_err();
    assert_eq!(
        err,
        CatalogError::Conflict {
            book_id: 1,
            patron_id: 11,
            holder: Some(10),
        }
    );
    assert_eq!(err.code(), "LIB_RETURN_CONFLICT");
    assert_eq!(catalog.record(1).unwrap().borrowed_by(), Some(10));

    let err = catalog.return_book(10, 2).unwrap_err();
    assert_eq!(err.to_string(), "Book 2 not borrowed by Patron 10");
}

/// Unknown ids are reported and counted, never inserted.
#[test]
fn test_unknown_book_not_found() {
    let mut catalog = catalog_with(&[1]);

    assert_eq!(
        catalog.borrow_book(1, 99, 1),
        Err(CatalogError::NotFound { book_id: 99 })
    );
    assert!(catalog.return_book(1, 99).is_err());
    assert!(catalog.delete_book(99).is_err());
    assert!(catalog.print_one(99).is_err());
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.metrics().snapshot().not_found, 3);
}

// =============================================================================
// Capacity
// =============================================================================

/// A full waitlist rejects new patrons but still accepts priority updates.
#[test]
fn test_capacity_limit() {
    let mut catalog = LibraryCatalog::with_config(CatalogConfig::with_waitlist_capacity(3)).unwrap();
    assert_eq!(catalog.config().waitlist_capacity, 3);
    catalog.insert_book(1, "T", "A", false);

    for patron in 10..13 {
        assert_eq!(catalog.borrow_book(patron, 1, 5), Ok(BorrowOutcome::Reserved));
    }

    let err = catalog.borrow_book(99, 1, 0).unwrap_err();
    assert_eq!(err.code(), "LIB_WAITLIST_FULL");

    let waitlist = catalog.record(1).unwrap().waitlist();
    assert_eq!(waitlist.len(), 3);
    assert!(waitlist.is_heap_ordered());
    assert!(waitlist.find_by_patron(99).is_none());

    assert_eq!(catalog.borrow_book(12, 1, 0), Ok(BorrowOutcome::Reserved));
    assert_eq!(catalog.record(1).unwrap().waitlist().peek().unwrap().patron_id, 12);
}

/// A zero capacity configuration is refused.
#[test]
fn test_zero_capacity_config() {
    let err = LibraryCatalog::with_config(CatalogConfig::with_waitlist_capacity(0)).unwrap_err();
    assert_eq!(err.code(), "LIB_INVALID_CONFIG");
}

// =============================================================================
// Insert / Delete
// =============================================================================

/// Duplicate inserts leave the original record untouched.
#[test]
fn test_duplicate_insert_ignored() {
    let mut catalog = LibraryCatalog::new();
    assert_eq!(catalog.insert_book(5, "First", "A", true), InsertOutcome::Inserted);
    assert_eq!(catalog.insert_book(5, "Second", "B", false), InsertOutcome::Duplicate);

    let record = catalog.record(5).unwrap();
    assert_eq!(record.book_id(), 5);
    assert_eq!(record.title(), "First");
    assert_eq!(record.author(), "A");
    assert!(record.availability().is_available());
    assert_eq!(catalog.len(), 1);
}

/// Deleting reports every waiting patron and removes the book.
#[test]
fn test_delete_cancels_reservations() {
    let mut catalog = catalog_with(&[1, 2, 3]);
    catalog.borrow_book(1, 2, 1).unwrap();
    catalog.borrow_book(7, 2, 1).unwrap();
    catalog.borrow_book(3, 2, 2).unwrap();

    let outcome = catalog.delete_book(2).unwrap();
    let mut cancelled = outcome.cancelled.clone();
    cancelled.sort();
    assert_eq!(cancelled, vec![3, 7]);
    assert!(outcome.cancellation_phrase().starts_with(" Reservations made by Patrons"));

    assert!(catalog.record(2).is_none());
    assert_eq!(catalog.delete_book(3).unwrap().cancelled, Vec::<i64>::new());
    catalog.validate().unwrap();
}

// =============================================================================
// Views
// =============================================================================

/// Nearest lookup covers the empty, tied and single cases.
#[test]
fn test_find_closest_cases() {
    let mut catalog = LibraryCatalog::new();
    assert_eq!(catalog.find_closest(15), Nearest::None);

    catalog.insert_book(10, "Ten", "A", true);
    catalog.insert_book(20, "Twenty", "A", true);

    match catalog.find_closest(15) {
        Nearest::Tie(low, high) => {
            assert_eq!(low.book_id, 10);
            assert_eq!(high.book_id, 20);
        }
        other => panic!("expected tie, got {:?}", other),
    }

    match catalog.find_closest(12) {
        Nearest::One(book) => assert_eq!(book.book_id, 10),
        other => panic!("expected single book, got {:?}", other),
    }
}

/// Reservations are displayed by priority, then arrival.
#[test]
fn test_snapshot_display_order() {
    let mut catalog = catalog_with(&[1]);
    catalog.borrow_book(100, 1, 1).unwrap();
    catalog.borrow_book(5, 1, 3).unwrap();
    catalog.borrow_book(6, 1, 1).unwrap();
    catalog.borrow_book(7, 1, 3).unwrap();
    catalog.borrow_book(8, 1, 2).unwrap();

    let snapshot = catalog.print_one(1).unwrap();
    assert_eq!(snapshot.reservations, vec![6, 8, 5, 7]);
}

/// Read-only views leave the rotation counter alone.
#[test]
fn test_views_do_not_count() {
    let catalog = catalog_with(&[50, 20, 80, 10, 30, 70, 90, 5]);
    let before = catalog.rotation_count();

    catalog.print_one(30).unwrap();
    catalog.print_range(0, 100);
    catalog.print_all();
    catalog.find_closest(55);

    assert_eq!(catalog.rotation_count(), before);
}
