//! librarium - an in-memory library catalog
//!
//! Books live in a red-black tree keyed by book id; each book carries a
//! bounded min-heap of patron reservations. Scripts of catalog commands
//! drive the catalog from the `librarium` binary.

pub mod catalog;
pub mod cli;
pub mod index;
pub mod observability;
pub mod reservation;
pub mod script;

/// Unique book identifier; the ordering key of the index
pub type BookId = i64;

/// Patron identifier
pub type PatronId = i64;

/// Reservation priority; lower values are served first
pub type Priority = i32;
