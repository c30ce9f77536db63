//! Database statistics.
//!
//! Counters for the commands a database has executed.
//!
//! # Usage
//!
//! ```rust
//! use txkv_core::{Command, Database};
//!
//! let mut db = Database::new();
//! db.execute(Command::Begin).unwrap();
//! db.execute(Command::parse("SET a 1").unwrap()).unwrap();
//!
//! let stats = db.stats();
//! assert_eq!(stats.sets(), 1);
//! assert_eq!(stats.compensations_recorded(), 1);
//! ```

use serde::Serialize;
use std::fmt;

/// Database statistics.
///
/// Counters are monotonically increasing. Replayed compensations are
/// counted separately and do not bump `sets`/`unsets`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    gets: u64,
    sets: u64,
    unsets: u64,
    num_equal_to: u64,

    begins: u64,
    rollbacks: u64,
    commits: u64,
    /// ROLLBACK/COMMIT with no open transaction.
    no_transaction: u64,

    compensations_recorded: u64,
    compensations_replayed: u64,
}

impl DatabaseStats {
    /// Creates zeroed stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_get(&mut self) {
        self.gets += 1;
    }

    pub(crate) fn record_set(&mut self) {
        self.sets += 1;
    }

    pub(crate) fn record_unset(&mut self) {
        self.unsets += 1;
    }

    pub(crate) fn record_num_equal_to(&mut self) {
        self.num_equal_to += 1;
    }

    pub(crate) fn record_begin(&mut self) {
        self.begins += 1;
    }

    pub(crate) fn record_rollback(&mut self, replayed: usize) {
        self.rollbacks += 1;
        self.compensations_replayed += replayed as u64;
    }

    pub(crate) fn record_commit(&mut self) {
        self.commits += 1;
    }

    pub(crate) fn record_no_transaction(&mut self) {
        self.no_transaction += 1;
    }

    pub(crate) fn record_compensation(&mut self) {
        self.compensations_recorded += 1;
    }

    // === Accessors ===

    /// GET commands executed.
    #[must_use]
    pub fn gets(&self) -> u64 {
        self.gets
    }

    /// SET commands executed (replay excluded).
    #[must_use]
    pub fn sets(&self) -> u64 {
        self.sets
    }

    /// UNSET commands executed (replay excluded).
    #[must_use]
    pub fn unsets(&self) -> u64 {
        self.unsets
    }

    /// NUMEQUALTO commands executed.
    #[must_use]
    pub fn num_equal_to(&self) -> u64 {
        self.num_equal_to
    }

    /// Transactions opened.
    #[must_use]
    pub fn begins(&self) -> u64 {
        self.begins
    }

    /// Blocks rolled back.
    #[must_use]
    pub fn rollbacks(&self) -> u64 {
        self.rollbacks
    }

    /// Successful commits.
    #[must_use]
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// ROLLBACK or COMMIT issued with nothing open.
    #[must_use]
    pub fn no_transaction(&self) -> u64 {
        self.no_transaction
    }

    /// Compensations appended to a block.
    #[must_use]
    pub fn compensations_recorded(&self) -> u64 {
        self.compensations_recorded
    }

    /// Compensations applied during rollback replay.
    #[must_use]
    pub fn compensations_replayed(&self) -> u64 {
        self.compensations_replayed
    }
}

impl fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "commands: get={} set={} unset={} numequalto={}",
            self.gets, self.sets, self.unsets, self.num_equal_to
        )?;
        writeln!(
            f,
            "transactions: begin={} rollback={} commit={} no_transaction={}",
            self.begins, self.rollbacks, self.commits, self.no_transaction
        )?;
        write!(
            f,
            "compensations: recorded={} replayed={}",
            self.compensations_recorded, self.compensations_replayed
        )
    }
}
