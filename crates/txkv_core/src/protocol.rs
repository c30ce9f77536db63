//! Line-level protocol helpers shared by the read loop and test fixtures.

use crate::command::{Command, Response};
use crate::database::Database;
use crate::error::{CoreError, CoreResult};

pub use crate::command::INPUT_ERROR_MESSAGE;

/// Output of handling one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading; print `reply` if present.
    Continue {
        /// Line to print, if the command produced output.
        reply: Option<String>,
    },
    /// END was received.
    Stop,
}

/// Maps the result of a command to the line printed for it.
///
/// Errors are never fatal: they are rendered as their protocol text.
#[must_use]
pub fn reply_line(result: &CoreResult<Response>) -> Option<String> {
    match result {
        Ok(response) => response.output(),
        Err(err) => Some(err.to_string()),
    }
}

/// Parses and executes one input line against `db`.
pub fn handle_line(db: &mut Database, line: &str) -> LineOutcome {
    let result = Command::parse(line)
        .map_err(CoreError::from)
        .and_then(|command| db.execute(command));

    if let Err(err) = &result {
        if !err.is_no_transaction() {
            tracing::debug!(line, error = ?err, "rejected input line");
        }
    }

    match result {
        Ok(Response::End) => LineOutcome::Stop,
        other => LineOutcome::Continue {
            reply: reply_line(&other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(db: &mut Database, lines: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for line in lines {
            match handle_line(db, line) {
                LineOutcome::Continue { reply } => out.extend(reply),
                LineOutcome::Stop => break,
            }
        }
        out
    }

    #[test]
    fn reply_line_renders_results() {
        assert_eq!(reply_line(&Ok(Response::None)), None);
        assert_eq!(
            reply_line(&Ok(Response::Count(2))).as_deref(),
            Some("2")
        );
        assert_eq!(
            reply_line(&Err(CoreError::NoTransaction)).as_deref(),
            Some("NO TRANSACTION")
        );
    }

    #[test]
    fn reverse_count_scenario() {
        let mut db = Database::new();
        let out = run(
            &mut db,
            &[
                "SET a foo",
                "SET b foo",
                "NUMEQUALTO foo",
                "UNSET a",
                "NUMEQUALTO foo",
                "NUMEQUALTO bar",
                "END",
            ],
        );
        assert_eq!(out, ["2", "1", "0"]);
    }

    #[test]
    fn nested_rollback_scenario() {
        let mut db = Database::new();
        let out = run(
            &mut db,
            &[
                "BEGIN",
                "SET a 10",
                "GET a",
                "BEGIN",
                "SET a 20",
                "GET a",
                "ROLLBACK",
                "GET a",
                "ROLLBACK",
                "GET a",
                "END",
            ],
        );
        assert_eq!(out, ["10", "20", "10", "NULL"]);
    }

    #[test]
    fn bad_input_reports_and_continues() {
        let mut db = Database::new();
        let out = run(&mut db, &["set a 1", "SET a 1", "GET a"]);
        assert_eq!(out, [INPUT_ERROR_MESSAGE, "1"]);
    }

    #[test]
    fn end_stops_processing() {
        let mut db = Database::new();
        let out = run(&mut db, &["SET a 1", "END", "GET a"]);
        assert!(out.is_empty());
        assert_eq!(handle_line(&mut db, "END"), LineOutcome::Stop);
    }

    #[test]
    fn rollback_without_transaction() {
        let mut db = Database::new();
        let out = run(&mut db, &["ROLLBACK", "COMMIT"]);
        assert_eq!(out, ["NO TRANSACTION", "NO TRANSACTION"]);
    }
}
