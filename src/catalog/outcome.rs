//! Tagged results of catalog state transitions

use serde::Serialize;

use crate::PatronId;

/// Result of `insert_book`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InsertOutcome {
    Inserted,
    /// Id already present; the catalog was left unchanged
    Duplicate,
}

/// Result of a successful `borrow_book`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BorrowOutcome {
    /// The book was available and is now held by the patron
    Borrowed,
    /// The book is out; the patron's reservation was added or re-prioritized
    Reserved,
}

/// Result of a successful `return_book`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnOutcome {
    /// Nobody was waiting; the book is back on the shelf
    Returned,
    /// The highest-priority reservation now holds the book
    Reallotted { next_patron: PatronId },
}

/// Result of a successful `delete_book`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Patrons whose reservations were cancelled, in waitlist storage order
    pub cancelled: Vec<PatronId>,
}

impl DeleteOutcome {
    /// Sentence appended to the deletion notice; empty when nobody was waiting.
    pub fn cancellation_phrase(&self) -> String {
        match self.cancelled.as_slice() {
            [] => String::new(),
            [only] => format!(" Reservation made by Patron {} has been cancelled!", only),
            many => format!(
                " Reservations made by Patrons {} have been cancelled!",
                many.iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
