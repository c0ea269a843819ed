//! Reservation waitlist for a single book
//!
//! Each catalog record owns one `ReservationQueue`: a bounded, 1-indexed
//! binary min-heap ordered by priority number (lower is served first).
//!
//! # Invariants
//!
//! - Every parent's priority is <= each child's priority
//! - `len() <= capacity()`
//! - A full queue rejects inserts without mutating

mod errors;
mod queue;

pub use errors::{QueueError, QueueResult};
pub use queue::{Reservation, ReservationQueue, DEFAULT_CAPACITY};
