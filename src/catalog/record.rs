//! Catalog record: a book's business data plus its owned waitlist

use serde::{Deserialize, Serialize};

use crate::reservation::{Reservation, ReservationQueue};
use crate::{BookId, PatronId};

/// Whether a book can be lent right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Borrowed,
}

impl Availability {
    pub fn from_flag(available: bool) -> Self {
        if available {
            Availability::Available
        } else {
            Availability::Borrowed
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// "Yes" / "No", as written in scripts and reports
    pub fn as_yes_no(&self) -> &'static str {
        match self {
            Availability::Available => "Yes",
            Availability::Borrowed => "No",
        }
    }
}

/// One book in the catalog.
///
/// The waitlist is composed directly into the record, so removing the
/// record from the index also hands back its pending reservations.
#[derive(Debug, Clone)]
pub struct CatalogRecord {
    book_id: BookId,
    title: String,
    author: String,
    availability: Availability,
    borrowed_by: Option<PatronId>,
    waitlist: ReservationQueue,
}

impl CatalogRecord {
    pub fn new(
        book_id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        availability: Availability,
        waitlist_capacity: usize,
    ) -> Self {
        Self {
            book_id,
            title: title.into(),
            author: author.into(),
            availability,
            borrowed_by: None,
            waitlist: ReservationQueue::with_capacity(waitlist_capacity),
        }
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn borrowed_by(&self) -> Option<PatronId> {
        self.borrowed_by
    }

    pub fn waitlist(&self) -> &ReservationQueue {
        &self.waitlist
    }

    pub(super) fn waitlist_mut(&mut self) -> &mut ReservationQueue {
        &mut self.waitlist
    }

    /// Transition to Borrowed(patron)
    pub(super) fn lend_to(&mut self, patron_id: PatronId) {
        self.availability = Availability::Borrowed;
        self.borrowed_by = Some(patron_id);
    }

    /// Transition to Available with no holder
    pub(super) fn shelve(&mut self) {
        self.availability = Availability::Available;
        self.borrowed_by = None;
    }

    /// Consume the record, returning every pending patron on its waitlist
    pub(super) fn into_cancellations(mut self) -> Vec<PatronId> {
        self.waitlist.drain()
    }

    /// Read-only projection of the current state
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            book_id: self.book_id,
            title: self.title.clone(),
            author: self.author.clone(),
            availability: self.availability,
            borrowed_by: self.borrowed_by,
            reservations: self.waitlist.patrons_in_display_order(),
            reservation_detail: self.waitlist.in_display_order().into_iter().cloned().collect(),
        }
    }
}

/// Point-in-time view of a record, with reservations in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSnapshot {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub availability: Availability,
    pub borrowed_by: Option<PatronId>,
    pub reservations: Vec<PatronId>,
    /// Full entries in the same order, including when each was taken
    pub reservation_detail: Vec<Reservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_holder() {
        let record = CatalogRecord::new(1, "Dune", "Frank Herbert", Availability::Borrowed, 20);
        assert_eq!(record.availability(), Availability::Borrowed);
        assert_eq!(record.borrowed_by(), None);
        assert!(record.waitlist().is_empty());
    }

    #[test]
    fn test_lend_and_shelve() {
        let mut record = CatalogRecord::new(1, "Dune", "Frank Herbert", Availability::Available, 20);
        record.lend_to(9);
        assert_eq!(record.availability(), Availability::Borrowed);
        assert_eq!(record.borrowed_by(), Some(9));

        record.shelve();
        assert!(record.availability().is_available());
        assert_eq!(record.borrowed_by(), None);
    }

    #[test]
    fn test_snapshot_lists_reservations_by_priority() {
        let mut record = CatalogRecord::new(4, "Emma", "Jane Austen", Availability::Borrowed, 20);
        record.waitlist_mut().insert(Reservation::new(4, 11, 3, 0)).unwrap();
        record.waitlist_mut().insert(Reservation::new(4, 12, 1, 1)).unwrap();

        let snapshot = record.snapshot();
        assert_eq!(snapshot.reservations, vec![12, 11]);
        assert_eq!(snapshot.title, "Emma");

        let detail: Vec<(i64, i32)> = snapshot
            .reservation_detail
            .iter()
            .map(|r| (r.patron_id, r.priority))
            .collect();
        assert_eq!(detail, vec![(12, 1), (11, 3)]);
        assert!(snapshot.reservation_detail[0].reserved_at <= chrono::Utc::now());
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(Availability::from_flag(true).as_yes_no(), "Yes");
        assert_eq!(Availability::from_flag(false).as_yes_no(), "No");
    }
}
