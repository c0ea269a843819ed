//! Typed script commands

use crate::{BookId, PatronId, Priority};

/// One parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    InsertBook {
        book_id: BookId,
        title: String,
        author: String,
        available: bool,
    },
    PrintBook {
        book_id: BookId,
    },
    PrintBooks {
        low: BookId,
        high: BookId,
    },
    BorrowBook {
        patron_id: PatronId,
        book_id: BookId,
        priority: Priority,
    },
    ReturnBook {
        patron_id: PatronId,
        book_id: BookId,
    },
    DeleteBook {
        book_id: BookId,
    },
    FindClosestBook {
        book_id: BookId,
    },
    ColorFlipCount,
    Quit,
}
