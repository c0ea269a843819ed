//! Bounded binary min-heap of reservations
//!
//! Slots are addressed 1-indexed: the root is slot 1, the children of slot
//! `i` are `2i` and `2i + 1`, and its parent is `i / 2`. Storage is a plain
//! `Vec` where slot `i` lives at `heap[i - 1]`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::errors::{QueueError, QueueResult};
use crate::{BookId, PatronId, Priority};

/// Default waitlist capacity per book
pub const DEFAULT_CAPACITY: usize = 20;

/// A pending claim on a borrowed book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub book_id: BookId,
    pub patron_id: PatronId,
    /// Lower value is served first
    pub priority: Priority,
    /// Monotonic stamp from the catalog clock, used as display tie-break
    pub sequence: u64,
    /// Wall-clock time the reservation was taken
    pub reserved_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a reservation stamped with the current wall-clock time
    pub fn new(book_id: BookId, patron_id: PatronId, priority: Priority, sequence: u64) -> Self {
        Self {
            book_id,
            patron_id,
            priority,
            sequence,
            reserved_at: Utc::now(),
        }
    }
}

/// Fixed-capacity min-priority queue of reservations.
#[derive(Debug, Clone)]
pub struct ReservationQueue {
    heap: Vec<Reservation>,
    capacity: usize,
}

impl Default for ReservationQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ReservationQueue {
    /// Creates an empty queue with the default capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue holding at most `capacity` reservations
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of queued reservations
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The reservation that `extract_min` would return next
    pub fn peek(&self) -> Option<&Reservation> {
        self.heap.first()
    }

    /// Insert a reservation.
    ///
    /// Rejects with `CapacityExceeded` when full; the queue is left untouched.
    pub fn insert(&mut self, reservation: Reservation) -> QueueResult<()> {
        if self.is_full() {
            return Err(QueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.heap.push(reservation);
        let last = self.heap.len();
        self.sift_up(last);
        Ok(())
    }

    /// Remove and return the reservation with the lowest priority number.
    pub fn extract_min(&mut self) -> QueueResult<Reservation> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }

        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(1);
        }
        Ok(min)
    }

    /// Linear scan for a patron's reservation
    pub fn find_by_patron(&self, patron_id: PatronId) -> Option<&Reservation> {
        self.heap.iter().find(|r| r.patron_id == patron_id)
    }

    /// Overwrite the priority of a patron's existing reservation.
    ///
    /// The entry is re-sifted in whichever direction the new priority
    /// requires. Returns false if the patron holds no reservation.
    pub fn update_priority(&mut self, patron_id: PatronId, priority: Priority) -> bool {
        let Some(index) = self.heap.iter().position(|r| r.patron_id == patron_id) else {
            return false;
        };

        let slot = index + 1;
        let previous = self.heap[index].priority;
        self.heap[index].priority = priority;

        if priority < previous {
            self.sift_up(slot);
        } else if priority > previous {
            self.sift_down(slot);
        }
        true
    }

    /// Reservations ordered by (priority, sequence), independent of heap layout
    pub fn in_display_order(&self) -> Vec<&Reservation> {
        let mut entries: Vec<&Reservation> = self.heap.iter().collect();
        entries.sort_by_key(|r| (r.priority, r.sequence));
        entries
    }

    pub fn patrons_in_display_order(&self) -> Vec<PatronId> {
        self.in_display_order().into_iter().map(|r| r.patron_id).collect()
    }

    /// Empty the queue, returning every pending patron id in heap order
    pub fn drain(&mut self) -> Vec<PatronId> {
        self.heap.drain(..).map(|r| r.patron_id).collect()
    }

    /// Checks the heap-order and capacity invariants
    pub fn is_heap_ordered(&self) -> bool {
        if self.heap.len() > self.capacity {
            return false;
        }
        (2..=self.heap.len()).all(|slot| self.priority_at(slot / 2) <= self.priority_at(slot))
    }

    // =========================================================================
    // Sifting (1-indexed slots)
    // =========================================================================

    #[inline]
    fn priority_at(&self, slot: usize) -> Priority {
        self.heap[slot - 1].priority
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a - 1, b - 1);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 1 && self.priority_at(slot) < self.priority_at(slot / 2) {
            self.swap_slots(slot, slot / 2);
            slot /= 2;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let size = self.heap.len();
        while slot * 2 <= size {
            let left = slot * 2;
            let right = left + 1;

            // Equal children resolve to the left one
            let child = if right <= size && self.priority_at(right) < self.priority_at(left) {
                right
            } else {
                left
            };

            if self.priority_at(slot) <= self.priority_at(child) {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }
}
