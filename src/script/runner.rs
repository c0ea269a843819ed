//! Script runner: feeds parsed commands to one catalog in order

use std::io::{self, Write};

use super::command::ScriptCommand;
use super::report::{OutputFormat, Report};
use crate::catalog::LibraryCatalog;
use crate::observability::{log_event, Event};

/// Counts from one `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Commands applied to the catalog
    pub executed: usize,
    /// Commands ignored because they followed `Quit`
    pub skipped: usize,
    pub quit: bool,
}

/// Executes commands against a catalog and writes their reports.
pub struct ScriptRunner {
    catalog: LibraryCatalog,
    format: OutputFormat,
    quit: bool,
}

impl ScriptRunner {
    pub fn new(catalog: LibraryCatalog, format: OutputFormat) -> Self {
        Self {
            catalog,
            format,
            quit: false,
        }
    }

    pub fn catalog(&self) -> &LibraryCatalog {
        &self.catalog
    }

    /// Apply a single command. Returns `None` once `Quit` has been seen.
    pub fn execute(&mut self, command: &ScriptCommand) -> Option<Report> {
        if self.quit {
            return None;
        }

        let catalog = &mut self.catalog;
        let report = match command {
            ScriptCommand::InsertBook {
                book_id,
                title,
                author,
                available,
            } => Report::Insert {
                book_id: *book_id,
                outcome: catalog.insert_book(*book_id, title.as_str(), author.as_str(), *available),
            },
            ScriptCommand::PrintBook { book_id } => Report::Book(catalog.print_one(*book_id)),
            ScriptCommand::PrintBooks { low, high } => Report::Books(catalog.print_range(*low, *high)),
            ScriptCommand::BorrowBook {
                patron_id,
                book_id,
                priority,
            } => Report::Borrow {
                patron_id: *patron_id,
                book_id: *book_id,
                result: catalog.borrow_book(*patron_id, *book_id, *priority),
            },
            ScriptCommand::ReturnBook { patron_id, book_id } => Report::Return {
                patron_id: *patron_id,
                book_id: *book_id,
                result: catalog.return_book(*patron_id, *book_id),
            },
            ScriptCommand::DeleteBook { book_id } => Report::Delete {
                book_id: *book_id,
                result: catalog.delete_book(*book_id),
            },
            ScriptCommand::FindClosestBook { book_id } => Report::Closest(catalog.find_closest(*book_id)),
            ScriptCommand::ColorFlipCount => Report::RotationCount(catalog.rotation_count()),
            ScriptCommand::Quit => {
                self.quit = true;
                Report::Terminated
            }
        };

        Some(report)
    }

    /// Run every command, writing each report to `out`
    pub fn run<W: Write>(&mut self, commands: &[ScriptCommand], out: &mut W) -> io::Result<RunSummary> {
        log_event(Event::ScriptBegin, &[("commands", commands.len().to_string().as_str())]);

        let mut summary = RunSummary::default();
        for command in commands {
            match self.execute(command) {
                Some(report) => {
                    summary.executed += 1;
                    self.write_report(&report, out)?;
                }
                None => summary.skipped += 1,
            }
        }
        summary.quit = self.quit;
        out.flush()?;

        if summary.quit {
            log_event(Event::ScriptQuit, &[("skipped", summary.skipped.to_string().as_str())]);
        }
        log_event(
            Event::ScriptComplete,
            &[
                ("books", self.catalog.len().to_string().as_str()),
                ("executed", summary.executed.to_string().as_str()),
            ],
        );
        Ok(summary)
    }

    fn write_report<W: Write>(&self, report: &Report, out: &mut W) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                if let Some(text) = report.to_text() {
                    writeln!(out, "{}", text)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &report.to_json())?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn run_text(source: &str) -> (String, RunSummary) {
        let commands = parse_script(source).unwrap();
        let mut runner = ScriptRunner::new(LibraryCatalog::new(), OutputFormat::Text);
        let mut out = Vec::new();
        let summary = runner.run(&commands, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_commands_after_quit_are_ignored() {
        let (output, summary) = run_text(
            "InsertBook(1, \"A\", \"B\", \"Yes\");\nQuit();\nPrintBook(1);\n",
        );
        assert_eq!(output, "Program Terminated!!\n");
        assert_eq!(summary, RunSummary { executed: 2, skipped: 1, quit: true });
    }

    #[test]
    fn test_borrow_reserve_return_flow() {
        let (output, _) = run_text(concat!(
            "InsertBook(1, \"A\", \"B\", \"Yes\");\n",
            "BorrowBook(10, 1, 1);\n",
            "BorrowBook(11, 1, 2);\n",
            "ReturnBook(10, 1);\n",
            "ReturnBook(10, 1);\n",
        ));
        assert_eq!(
            output,
            concat!(
                "Book 1 Borrowed by Patron 10\n",
                "Book 1 Reserved by Patron 11\n",
                "Book 1 Returned by Patron 10\n",
                "Book 1 Allotted to Patron 11\n",
                "Book 1 not borrowed by Patron 10\n",
            )
        );
    }

    #[test]
    fn test_json_print_includes_reservation_times() {
        let commands = parse_script(concat!(
            "InsertBook(1, \"A\", \"B\", \"No\");\n",
            "BorrowBook(-4, 1, -2);\n",
            "PrintBook(1);\n",
        ))
        .unwrap();
        let mut runner = ScriptRunner::new(LibraryCatalog::new(), OutputFormat::Json);
        let mut out = Vec::new();
        runner.run(&commands, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let printed: serde_json::Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
        let detail = &printed["data"]["reservation_detail"][0];
        assert_eq!(detail["patron_id"], -4);
        assert_eq!(detail["priority"], -2);
        assert!(detail["reserved_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_json_lines() {
        let commands = parse_script("PrintBook(3);\nColorFlipCount();").unwrap();
        let mut runner = ScriptRunner::new(LibraryCatalog::new(), OutputFormat::Json);
        let mut out = Vec::new();
        runner.run(&commands, &mut out).unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], "error");
        assert_eq!(lines[1]["data"]["rotation_count"], 0);
    }
}
