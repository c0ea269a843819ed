//! Line-oriented script parser
//!
//! Grammar: `Name(arg, arg, ...);`, one command per line. The trailing
//! semicolon is optional and blank lines are skipped. Double-quoted
//! arguments may contain commas; the quotes are stripped.

use std::str::FromStr;

use super::command::ScriptCommand;
use super::errors::{ScriptError, ScriptResult};
use crate::observability::{log_event, Event};

/// Parse a whole script, stopping at the first bad line.
///
/// Lines naming an unknown command are skipped with a warning.
pub fn parse_script(source: &str) -> ScriptResult<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (idx, text) in source.lines().enumerate() {
        match parse_line(text, idx + 1) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(ScriptError::UnknownCommand { line, name }) => log_event(
                Event::UnknownCommand,
                &[("line", line.to_string().as_str()), ("name", name.as_str())],
            ),
            Err(err) => return Err(err),
        }
    }
    Ok(commands)
}

/// Parse one line; `Ok(None)` for blank lines
pub fn parse_line(text: &str, line: usize) -> ScriptResult<Option<ScriptCommand>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let malformed = || ScriptError::Malformed {
        line,
        text: trimmed.to_string(),
    };

    let body = trimmed.trim_end_matches(';').trim_end();
    let open = body.find('(').ok_or_else(malformed)?;
    let inner = body
        .strip_suffix(')')
        .and_then(|b| b.get(open + 1..))
        .ok_or_else(malformed)?;
    let name = body[..open].trim();
    let args = split_args(inner).ok_or_else(malformed)?;

    let command = match name {
        "InsertBook" => {
            let args = Args::new(line, "InsertBook", &args, 4)?;
            ScriptCommand::InsertBook {
                book_id: args.number(0)?,
                title: unquote(args.raw(1)).to_string(),
                author: unquote(args.raw(2)).to_string(),
                available: args.yes_no(3)?,
            }
        }
        "PrintBook" => {
            let args = Args::new(line, "PrintBook", &args, 1)?;
            ScriptCommand::PrintBook {
                book_id: args.number(0)?,
            }
        }
        "PrintBooks" => {
            let args = Args::new(line, "PrintBooks", &args, 2)?;
            ScriptCommand::PrintBooks {
                low: args.number(0)?,
                high: args.number(1)?,
            }
        }
        "BorrowBook" => {
            let args = Args::new(line, "BorrowBook", &args, 3)?;
            ScriptCommand::BorrowBook {
                patron_id: args.number(0)?,
                book_id: args.number(1)?,
                priority: args.number(2)?,
            }
        }
        "ReturnBook" => {
            let args = Args::new(line, "ReturnBook", &args, 2)?;
            ScriptCommand::ReturnBook {
                patron_id: args.number(0)?,
                book_id: args.number(1)?,
            }
        }
        "DeleteBook" => {
            let args = Args::new(line, "DeleteBook", &args, 1)?;
            ScriptCommand::DeleteBook {
                book_id: args.number(0)?,
            }
        }
        "FindClosestBook" => {
            let args = Args::new(line, "FindClosestBook", &args, 1)?;
            ScriptCommand::FindClosestBook {
                book_id: args.number(0)?,
            }
        }
        "ColorFlipCount" => {
            Args::new(line, "ColorFlipCount", &args, 0)?;
            ScriptCommand::ColorFlipCount
        }
        "Quit" => {
            Args::new(line, "Quit", &args, 0)?;
            ScriptCommand::Quit
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                name: other.to_string(),
            })
        }
    };

    Ok(Some(command))
}

/// Split on commas outside double quotes. `None` on an unclosed quote.
fn split_args(inner: &str) -> Option<Vec<&str>> {
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }

    let mut args = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, c) in inner.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                args.push(inner[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }

    if in_quotes {
        return None;
    }
    args.push(inner[start..].trim());
    Some(args)
}

fn unquote(arg: &str) -> &str {
    arg.strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .unwrap_or(arg)
}

/// Arity-checked view over a command's arguments
struct Args<'a> {
    line: usize,
    command: &'static str,
    values: &'a [&'a str],
}

impl<'a> Args<'a> {
    fn new(
        line: usize,
        command: &'static str,
        values: &'a [&'a str],
        expected: usize,
    ) -> ScriptResult<Self> {
        if values.len() != expected {
            return Err(ScriptError::ArgumentCount {
                line,
                command,
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            line,
            command,
            values,
        })
    }

    fn raw(&self, idx: usize) -> &'a str {
        self.values[idx]
    }

    fn number<T: FromStr>(&self, idx: usize) -> ScriptResult<T> {
        self.values[idx]
            .parse()
            .map_err(|_| self.invalid(idx, "expected an integer"))
    }

    fn yes_no(&self, idx: usize) -> ScriptResult<bool> {
        let value = unquote(self.values[idx]);
        if value.eq_ignore_ascii_case("yes") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("no") {
            Ok(false)
        } else {
            Err(self.invalid(idx, "expected \"Yes\" or \"No\""))
        }
    }

    fn invalid(&self, idx: usize, reason: &'static str) -> ScriptError {
        ScriptError::InvalidArgument {
            line: self.line,
            command: self.command,
            value: self.values[idx].to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_insert_with_comma_in_title() {
        let command = parse_line(r#"InsertBook(4, "Dune, Messiah", "Frank Herbert", "Yes");"#, 1)
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            ScriptCommand::InsertBook {
                book_id: 4,
                title: "Dune, Messiah".to_string(),
                author: "Frank Herbert".to_string(),
                available: true,
            }
        );
    }

    #[test]
    fn test_parse_numeric_commands() {
        assert_eq!(
            parse_line("BorrowBook(101, 48, 1)", 1).unwrap(),
            Some(ScriptCommand::BorrowBook { patron_id: 101, book_id: 48, priority: 1 })
        );
        assert_eq!(
            parse_line("  PrintBooks(10, 60);  ", 1).unwrap(),
            Some(ScriptCommand::PrintBooks { low: 10, high: 60 })
        );
        assert_eq!(parse_line("ColorFlipCount()", 1).unwrap(), Some(ScriptCommand::ColorFlipCount));
        assert_eq!(parse_line("Quit();", 1).unwrap(), Some(ScriptCommand::Quit));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let commands = parse_script("\nPrintBook(1);\n\n   \nQuit();\n").unwrap();
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_line("ShelveBook(2);", 2).unwrap_err();
        assert_eq!(err, ScriptError::UnknownCommand { line: 2, name: "ShelveBook".to_string() });

        let err = parse_script("PrintBook(1);\nPrintBook(x);").unwrap_err();
        assert_eq!(err.line(), 2);

        let err = parse_line("ReturnBook(1);", 7).unwrap_err();
        assert!(matches!(err, ScriptError::ArgumentCount { line: 7, expected: 2, found: 1, .. }));

        let err = parse_line("DeleteBook(abc);", 3).unwrap_err();
        assert!(matches!(err, ScriptError::InvalidArgument { line: 3, .. }));

        let err = parse_line(r#"InsertBook(1, "T", "A", "Maybe");"#, 4).unwrap_err();
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(parse_line("PrintBook 1;", 1), Err(ScriptError::Malformed { .. })));
        assert!(matches!(parse_line("PrintBook(1", 1), Err(ScriptError::Malformed { .. })));
        assert!(matches!(
            parse_line(r#"InsertBook(1, "Title, A, "Yes");"#, 1),
            Err(ScriptError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unknown_commands_skipped() {
        let commands = parse_script("PrintBook(1);\nShelveBook(2);\nQuit();").unwrap();
        assert_eq!(commands, vec![ScriptCommand::PrintBook { book_id: 1 }, ScriptCommand::Quit]);
    }

    #[test]
    fn test_negative_numbers_accepted() {
        assert_eq!(
            parse_line("BorrowBook(-7, -1, -3);", 1).unwrap(),
            Some(ScriptCommand::BorrowBook { patron_id: -7, book_id: -1, priority: -3 })
        );
        assert!(parse_line("PrintBook(1.5);", 1).is_err());
    }
}
