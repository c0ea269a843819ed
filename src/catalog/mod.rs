//! Library catalog
//!
//! Sequences insert, borrow, return and delete against the ordered index
//! and each record's reservation waitlist.
//!
//! # Transitions
//!
//! - Available --borrow--> Borrowed(patron)
//! - Borrowed --borrow by other--> Borrowed (reservation added or re-prioritized)
//! - Borrowed(p) --return by p, waitlist empty--> Available
//! - Borrowed(p) --return by p, waitlist non-empty--> Borrowed(next)
//! - any --delete--> gone, waitlist cancelled
//!
//! Single-threaded by construction: operations take `&mut self` and run to
//! completion.

mod config;
mod errors;
mod library;
mod outcome;
mod record;

pub use config::CatalogConfig;
pub use errors::{CatalogError, CatalogResult};
pub use library::LibraryCatalog;
pub use outcome::{BorrowOutcome, DeleteOutcome, InsertOutcome, ReturnOutcome};
pub use record::{Availability, BookSnapshot, CatalogRecord};
