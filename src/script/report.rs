//! Per-command results and their rendering
//!
//! Text rendering reproduces the report phrasing scripts are checked
//! against; JSON rendering emits one object per command.

use serde_json::{json, Value};

use crate::catalog::{
    BookSnapshot, BorrowOutcome, CatalogError, CatalogResult, DeleteOutcome, InsertOutcome,
    ReturnOutcome,
};
use crate::index::Nearest;
use crate::{BookId, PatronId};

/// How reports are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The outcome of executing one script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Insert {
        book_id: BookId,
        outcome: InsertOutcome,
    },
    Book(CatalogResult<BookSnapshot>),
    Books(Vec<BookSnapshot>),
    Borrow {
        patron_id: PatronId,
        book_id: BookId,
        result: CatalogResult<BorrowOutcome>,
    },
    Return {
        patron_id: PatronId,
        book_id: BookId,
        result: CatalogResult<ReturnOutcome>,
    },
    Delete {
        book_id: BookId,
        result: CatalogResult<DeleteOutcome>,
    },
    Closest(Nearest<BookSnapshot>),
    RotationCount(u64),
    Terminated,
}

impl Report {
    /// Script command that produced this report
    pub fn command(&self) -> &'static str {
        match self {
            Report::Insert { .. } => "InsertBook",
            Report::Book(_) => "PrintBook",
            Report::Books(_) => "PrintBooks",
            Report::Borrow { .. } => "BorrowBook",
            Report::Return { .. } => "ReturnBook",
            Report::Delete { .. } => "DeleteBook",
            Report::Closest(_) => "FindClosestBook",
            Report::RotationCount(_) => "ColorFlipCount",
            Report::Terminated => "Quit",
        }
    }

    /// Text form; `None` when the command prints nothing
    pub fn to_text(&self) -> Option<String> {
        let text = match self {
            Report::Insert { .. } => return None,
            Report::Book(Ok(book)) => book_block(book),
            Report::Book(Err(err)) => err.to_string(),
            Report::Books(books) if books.is_empty() => return None,
            Report::Books(books) => join_blocks(books.iter()),
            Report::Borrow {
                patron_id,
                book_id,
                result,
            } => match result {
                Ok(BorrowOutcome::Borrowed) => format!("Book {} Borrowed by Patron {}", book_id, patron_id),
                Ok(BorrowOutcome::Reserved) => format!("Book {} Reserved by Patron {}", book_id, patron_id),
                Err(CatalogError::CapacityExceeded { .. }) => format!(
                    "Book {} waitlist is full. Reservation by Patron {} not recorded",
                    book_id, patron_id
                ),
                Err(err) => err.to_string(),
            },
            Report::Return {
                patron_id,
                book_id,
                result,
            } => match result {
                Ok(ReturnOutcome::Returned) => format!("Book {} Returned by Patron {}", book_id, patron_id),
                Ok(ReturnOutcome::Reallotted { next_patron }) => format!(
                    "Book {} Returned by Patron {}\nBook {} Allotted to Patron {}",
                    book_id, patron_id, book_id, next_patron
                ),
                Err(err) => err.to_string(),
            },
            Report::Delete { book_id, result } => match result {
                Ok(outcome) => format!(
                    "Book {} is no longer available.{}",
                    book_id,
                    outcome.cancellation_phrase()
                ),
                Err(err) => err.to_string(),
            },
            Report::Closest(Nearest::None) => "No closest book found".to_string(),
            Report::Closest(Nearest::One(book)) => book_block(book),
            Report::Closest(Nearest::Tie(low, high)) => join_blocks([low, high].into_iter()),
            Report::RotationCount(count) => format!("Colour Flip Count: {}", count),
            Report::Terminated => "Program Terminated!!".to_string(),
        };
        Some(text)
    }

    /// JSON form: `{"command", "status": "ok", "data"}` or an error object
    pub fn to_json(&self) -> Value {
        let data = match self {
            Report::Insert { book_id, outcome } => json!({ "book_id": book_id, "outcome": outcome }),
            Report::Book(result) => match result {
                Ok(book) => json!(book),
                Err(err) => return self.error_json(err),
            },
            Report::Books(books) => json!({ "books": books }),
            Report::Borrow {
                patron_id,
                book_id,
                result,
            } => match result {
                Ok(outcome) => json!({ "book_id": book_id, "patron_id": patron_id, "outcome": outcome }),
                Err(err) => return self.error_json(err),
            },
            Report::Return {
                patron_id,
                book_id,
                result,
            } => match result {
                Ok(outcome) => json!({ "book_id": book_id, "patron_id": patron_id, "outcome": outcome }),
                Err(err) => return self.error_json(err),
            },
            Report::Delete { book_id, result } => match result {
                Ok(outcome) => json!({ "book_id": book_id, "cancelled": outcome.cancelled }),
                Err(err) => return self.error_json(err),
            },
            Report::Closest(nearest) => {
                let tie = matches!(nearest, Nearest::Tie(..));
                json!({ "books": nearest.clone().into_vec(), "tie": tie })
            }
            Report::RotationCount(count) => json!({ "rotation_count": count }),
            Report::Terminated => Value::Null,
        };

        json!({
            "command": self.command(),
            "status": "ok",
            "data": data,
        })
    }

    fn error_json(&self, err: &CatalogError) -> Value {
        json!({
            "command": self.command(),
            "status": "error",
            "code": err.code(),
            "message": err.to_string(),
        })
    }
}

/// Six-line record block followed by a blank line
fn book_block(book: &BookSnapshot) -> String {
    let holder = book
        .borrowed_by
        .map_or_else(|| "None".to_string(), |p| p.to_string());
    format!(
        "BookID = {}\nTitle = \"{}\"\nAuthor = \"{}\"\nAvailability = \"{}\"\nBorrowedBy = {}\nReservations = [{}]\n",
        book.book_id,
        book.title,
        book.author,
        book.availability.as_yes_no(),
        holder,
        join_ids(&book.reservations),
    )
}

fn join_blocks<'a>(books: impl Iterator<Item = &'a BookSnapshot>) -> String {
    books.map(book_block).collect::<Vec<_>>().join("\n")
}

fn join_ids(ids: &[PatronId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Availability;

    fn book(book_id: BookId, borrowed_by: Option<PatronId>, reservations: Vec<PatronId>) -> BookSnapshot {
        BookSnapshot {
            book_id,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            availability: if borrowed_by.is_some() {
                Availability::Borrowed
            } else {
                Availability::Available
            },
            borrowed_by,
            reservations,
            reservation_detail: Vec::new(),
        }
    }

    #[test]
    fn test_book_block_layout() {
        let text = Report::Book(Ok(book(4, Some(9), vec![3, 1]))).to_text().unwrap();
        assert_eq!(
            text,
            "BookID = 4\nTitle = \"Dune\"\nAuthor = \"Frank Herbert\"\nAvailability = \"No\"\nBorrowedBy = 9\nReservations = [3, 1]\n"
        );

        let text = Report::Book(Ok(book(4, None, vec![]))).to_text().unwrap();
        assert!(text.contains("BorrowedBy = None\nReservations = []\n"));
    }

    #[test]
    fn test_delete_phrasing_by_count() {
        let render = |cancelled: Vec<PatronId>| {
            Report::Delete {
                book_id: 5,
                result: Ok(DeleteOutcome { cancelled }),
            }
            .to_text()
            .unwrap()
        };

        assert_eq!(render(vec![]), "Book 5 is no longer available.");
        assert_eq!(
            render(vec![7]),
            "Book 5 is no longer available. Reservation made by Patron 7 has been cancelled!"
        );
        assert_eq!(
            render(vec![7, 3]),
            "Book 5 is no longer available. Reservations made by Patrons 7, 3 have been cancelled!"
        );
    }

    #[test]
    fn test_return_reallotment_two_lines() {
        let text = Report::Return {
            patron_id: 1,
            book_id: 2,
            result: Ok(ReturnOutcome::Reallotted { next_patron: 3 }),
        }
        .to_text()
        .unwrap();
        assert_eq!(text, "Book 2 Returned by Patron 1\nBook 2 Allotted to Patron 3");
    }

    #[test]
    fn test_silent_reports() {
        let insert = Report::Insert { book_id: 1, outcome: InsertOutcome::Inserted };
        assert_eq!(insert.to_text(), None);
        assert_eq!(Report::Books(vec![]).to_text(), None);
    }

    #[test]
    fn test_tie_prints_both_blocks() {
        let text = Report::Closest(Nearest::Tie(book(10, None, vec![]), book(20, None, vec![])))
            .to_text()
            .unwrap();
        assert!(text.starts_with("BookID = 10\n"));
        assert!(text.contains("\n\nBookID = 20\n"));
    }

    #[test]
    fn test_json_error_shape() {
        let report = Report::Borrow {
            patron_id: 1,
            book_id: 99,
            result: Err(CatalogError::NotFound { book_id: 99 }),
        };
        let value = report.to_json();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "LIB_BOOK_NOT_FOUND");
        assert_eq!(value["command"], "BorrowBook");
    }

    #[test]
    fn test_json_ok_shape() {
        let value = Report::Closest(Nearest::One(book(10, None, vec![]))).to_json();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"]["books"][0]["book_id"], 10);
        assert_eq!(value["data"]["tie"], false);
    }
}
