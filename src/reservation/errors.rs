//! Reservation queue errors

use thiserror::Error;

/// Result type for reservation queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors raised by `ReservationQueue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The waitlist is at capacity; the reservation was dropped
    #[error("Reservation queue is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// Nothing to extract
    #[error("Reservation queue is empty")]
    Empty,
}

impl QueueError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            QueueError::CapacityExceeded { .. } => "LIB_QUEUE_CAPACITY_EXCEEDED",
            QueueError::Empty => "LIB_QUEUE_EMPTY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QueueError::CapacityExceeded { capacity: 20 }.code(),
            "LIB_QUEUE_CAPACITY_EXCEEDED"
        );
        assert_eq!(QueueError::Empty.code(), "LIB_QUEUE_EMPTY");
    }

    #[test]
    fn test_error_display() {
        let display = format!("{}", QueueError::CapacityExceeded { capacity: 3 });
        assert!(display.contains("capacity 3"));
    }
}
