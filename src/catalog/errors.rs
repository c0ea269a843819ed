//! Catalog errors
//!
//! Every condition is detected before mutation; none is fatal.

use thiserror::Error;

use crate::{BookId, PatronId};

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Unknown book id
    #[error("Book {book_id} not found in the Library")]
    NotFound { book_id: BookId },

    /// Return attempted by someone other than the current holder
    #[error("Book {book_id} not borrowed by Patron {patron_id}")]
    Conflict {
        book_id: BookId,
        patron_id: PatronId,
        holder: Option<PatronId>,
    },

    /// Waitlist full; the new reservation was dropped
    #[error("Book {book_id} waitlist is full (capacity {capacity}); Patron {patron_id} not added")]
    CapacityExceeded {
        book_id: BookId,
        patron_id: PatronId,
        capacity: usize,
    },

    /// Rejected configuration
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

impl CatalogError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "LIB_BOOK_NOT_FOUND",
            CatalogError::Conflict { .. } => "LIB_RETURN_CONFLICT",
            CatalogError::CapacityExceeded { .. } => "LIB_WAITLIST_FULL",
            CatalogError::InvalidConfig(_) => "LIB_INVALID_CONFIG",
        }
    }
}
