//! Test fixtures and script helpers.
//!
//! Provides convenience functions for running protocol scripts against a
//! fresh database and collecting what they print.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use txkv_core::protocol::{handle_line, LineOutcome};
use txkv_core::{Command, Database};

/// Runs every line of `script` against a fresh database until `END`,
/// returning the printed lines.
pub fn run_script(script: &str) -> Vec<String> {
    let mut db = Database::new();
    run_script_on(&mut db, script)
}

/// Runs every line of `script` against `db` until `END`.
pub fn run_script_on(db: &mut Database, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in script.lines() {
        match handle_line(db, line) {
            LineOutcome::Continue { reply } => out.extend(reply),
            LineOutcome::Stop => break,
        }
    }
    out
}

/// Executes already-parsed commands, rendering each reply as the read loop
/// would. `None` entries are commands that print nothing.
pub fn run_commands(db: &mut Database, commands: &[Command]) -> Vec<Option<String>> {
    commands
        .iter()
        .map(|command| txkv_core::protocol::reply_line(&db.execute(command.clone())))
        .collect()
}

/// A protocol script stored in a temporary file.
///
/// The file is deleted when the fixture is dropped.
pub struct ScriptFile {
    file: NamedTempFile,
}

impl ScriptFile {
    /// Writes `lines` to a new temporary file, one per line.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut file = NamedTempFile::new().expect("Failed to create script file");
        for line in lines {
            writeln!(file, "{}", line.as_ref()).expect("Failed to write script line");
        }
        file.flush().expect("Failed to flush script file");
        Self { file }
    }

    /// Returns the path of the script file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a database with `count` keys `k0..` all holding `value`.
    pub fn populated_database(count: usize, value: &str) -> Database {
        let mut db = Database::new();
        for i in 0..count {
            db.set(format!("k{i}"), value);
        }
        db
    }

    /// Creates a database with `depth` nested transactions, each of which
    /// overwrites key `a` with its own level number.
    pub fn nested_database(depth: usize) -> Database {
        let mut db = Database::new();
        for level in 0..depth {
            db.begin().expect("Failed to begin transaction");
            db.set("a", level.to_string());
        }
        db
    }
}
