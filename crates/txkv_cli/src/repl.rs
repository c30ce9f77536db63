//! The read loop.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use txkv_core::protocol::{handle_line, LineOutcome};
use txkv_core::Database;

/// Errors that stop the read loop.
///
/// Command errors are not among them: they are printed and reading goes on.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// How a run of the read loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read, including the terminating `END`.
    pub lines: usize,
    /// True if `END` stopped the loop, false on end of input.
    pub ended: bool,
}

/// Opens the command source: the script file if given, otherwise stdin.
pub fn open_input(script: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match script {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Feeds every line of `input` to `db` until `END` or end of input,
/// writing replies to `output`.
pub fn run<R, W>(db: &mut Database, mut input: R, output: &mut W) -> Result<RunSummary, ReplError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = RunSummary {
        lines: 0,
        ended: false,
    };

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        summary.lines += 1;

        // Values are opaque tokens; undecodable bytes become U+FFFD.
        let text = String::from_utf8_lossy(&buf);
        let line = text.strip_suffix('\n').unwrap_or(&*text);
        let line = line.strip_suffix('\r').unwrap_or(line);

        match handle_line(db, line) {
            LineOutcome::Continue { reply: Some(reply) } => writeln!(output, "{reply}")?,
            LineOutcome::Continue { reply: None } => {}
            LineOutcome::Stop => {
                summary.ended = true;
                break;
            }
        }
    }

    output.flush()?;
    debug!(
        lines = summary.lines,
        ended = summary.ended,
        open_transactions = db.transaction_depth(),
        "read loop finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use txkv_core::protocol::INPUT_ERROR_MESSAGE;
    use txkv_core::Config;
    use txkv_testkit::ScriptFile;

    fn run_script(script: &str) -> (String, RunSummary) {
        let mut db = Database::new();
        let mut out = Vec::new();
        let summary = run(&mut db, Cursor::new(script), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn basic_session() {
        let (out, summary) = run_script("SET ex 10\nGET ex\nUNSET ex\nGET ex\nEND\n");
        assert_eq!(out, "10\nNULL\n");
        assert_eq!(summary, RunSummary { lines: 5, ended: true });
    }

    #[test]
    fn numequalto_session() {
        let (out, _) = run_script(
            "SET a 10\nSET b 10\nNUMEQUALTO 10\nNUMEQUALTO 20\nSET b 30\nNUMEQUALTO 10\nEND\n",
        );
        assert_eq!(out, "2\n0\n1\n");
    }

    #[test]
    fn nested_transactions_session() {
        let (out, _) = run_script(
            "BEGIN\nSET a 10\nGET a\nBEGIN\nSET a 20\nGET a\nROLLBACK\nGET a\nROLLBACK\nGET a\nEND\n",
        );
        assert_eq!(out, "10\n20\n10\nNULL\n");
    }

    #[test]
    fn commit_session() {
        let (out, _) = run_script(
            "BEGIN\nSET a 30\nBEGIN\nSET a 40\nCOMMIT\nGET a\nROLLBACK\nEND\n",
        );
        assert_eq!(out, "40\nNO TRANSACTION\n");
    }

    #[test]
    fn unset_inside_transaction_session() {
        let (out, _) = run_script(
            "SET a 50\nBEGIN\nGET a\nSET a 60\nBEGIN\nUNSET a\nGET a\nROLLBACK\nGET a\nCOMMIT\nGET a\nEND\n",
        );
        assert_eq!(out, "50\nNULL\n60\n60\n");
    }

    #[test]
    fn numequalto_with_rollback_session() {
        let (out, _) = run_script(
            "SET a 10\nBEGIN\nNUMEQUALTO 10\nBEGIN\nUNSET a\nNUMEQUALTO 10\nROLLBACK\nNUMEQUALTO 10\nCOMMIT\nEND\n",
        );
        assert_eq!(out, "1\n0\n1\n");
    }

    #[test]
    fn end_of_input_without_end() {
        let (out, summary) = run_script("SET a 1\nGET a");
        assert_eq!(out, "1\n");
        assert_eq!(summary, RunSummary { lines: 2, ended: false });
    }

    #[test]
    fn lines_after_end_are_ignored() {
        let (out, summary) = run_script("END\nGET a\n");
        assert_eq!(out, "");
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn malformed_lines_continue() {
        let (out, _) = run_script("\nset a 1\nSET a\nSET a 1\nGET a\n");
        let expected = format!("{m}\n{m}\n{m}\n1\n", m = INPUT_ERROR_MESSAGE);
        assert_eq!(out, expected);
    }

    #[test]
    fn crlf_line_endings() {
        let (out, summary) = run_script("SET a 1\r\nGET a\r\nEND\r\n");
        assert_eq!(out, "1\n");
        assert!(summary.ended);
    }

    #[test]
    fn lone_carriage_return_at_end_of_input() {
        let (out, summary) = run_script("SET a 1\nGET a\r");
        assert_eq!(out, "1\n");
        assert_eq!(summary, RunSummary { lines: 2, ended: false });
    }

    #[test]
    fn invalid_utf8_line_does_not_stop_input() {
        let mut db = Database::new();
        let mut out = Vec::new();
        let input: &[u8] = b"SET a \xff\nSET b 1\nGET b\nGET a\nEND\n";

        let summary = run(&mut db, input, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1\n\u{FFFD}\n");
        assert_eq!(summary, RunSummary { lines: 5, ended: true });
        assert_eq!(db.get("b"), Some("1"));
    }

    #[test]
    fn depth_limit_rejects_begin_and_continues() {
        let mut db = Database::with_config(Config::new().max_transaction_depth(Some(1)));
        let mut out = Vec::new();
        let script = "BEGIN\nBEGIN\nSET a 1\nROLLBACK\nGET a\nROLLBACK\nEND\n";

        run(&mut db, Cursor::new(script), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "transaction depth limit of 1 exceeded\nNULL\nNO TRANSACTION\n"
        );
        assert_eq!(db.config().max_transaction_depth, Some(1));
    }

    #[test]
    fn reads_script_file() {
        let script = ScriptFile::new(["SET a 7", "GET a"]);

        let input = open_input(Some(script.path())).unwrap();
        let mut db = Database::new();
        let mut out = Vec::new();
        run(&mut db, input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7\n");
    }

    #[test]
    fn missing_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_input(Some(&dir.path().join("missing.txt")));
        assert!(err.is_err());
    }
}
