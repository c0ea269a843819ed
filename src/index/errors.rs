//! Index invariant violation errors
//!
//! Error codes:
//! - LIB_INDEX_ROOT_NOT_BLACK
//! - LIB_INDEX_SENTINEL_NOT_BLACK
//! - LIB_INDEX_RED_RED
//! - LIB_INDEX_BLACK_HEIGHT
//! - LIB_INDEX_ORDER
//! - LIB_INDEX_LINK
//! - LIB_INDEX_COUNT

use std::fmt;

use crate::BookId;

/// Which structural invariant was found broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Root node is red
    RootNotBlack,
    /// The NIL sentinel was recolored
    SentinelNotBlack,
    /// A red node has a red child
    RedRed,
    /// Two paths below a node cross different numbers of black nodes
    BlackHeightMismatch,
    /// In-order traversal is not strictly increasing
    OrderViolation,
    /// A child's parent link does not point back at its parent
    BrokenLink,
    /// Reachable node count disagrees with the tracked length
    CountMismatch,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::RootNotBlack => "LIB_INDEX_ROOT_NOT_BLACK",
            IndexErrorCode::SentinelNotBlack => "LIB_INDEX_SENTINEL_NOT_BLACK",
            IndexErrorCode::RedRed => "LIB_INDEX_RED_RED",
            IndexErrorCode::BlackHeightMismatch => "LIB_INDEX_BLACK_HEIGHT",
            IndexErrorCode::OrderViolation => "LIB_INDEX_ORDER",
            IndexErrorCode::BrokenLink => "LIB_INDEX_LINK",
            IndexErrorCode::CountMismatch => "LIB_INDEX_COUNT",
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
    /// Key of the node where the violation was detected
    key: Option<BookId>,
}

impl IndexError {
    /// Create an error not tied to a particular node
    pub fn new(code: IndexErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            key: None,
        }
    }

    /// Create an error detected at the node holding `key`
    pub fn at_key(code: IndexErrorCode, key: BookId, message: impl Into<String>) -> Self {
        Self {
            code,
            message: format!("at key {}: {}", key, message.into()),
            key: Some(key),
        }
    }

    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn key(&self) -> Option<BookId> {
        self.key
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
