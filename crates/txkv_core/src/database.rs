//! Database facade and command dispatch.

use crate::command::{Command, Response};
use crate::config::Config;
use crate::error::CoreResult;
use crate::index::KeyValueIndex;
use crate::stats::DatabaseStats;
use crate::transaction::{Compensation, TransactionLog};
use tracing::{debug, trace};

/// Whether a dispatched command comes from the user or from rollback replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Mutations record their compensation in the innermost block.
    Normal,
    /// Mutations are undoing a block and must not be recorded.
    Replay,
}

/// The main database handle.
///
/// `Database` owns the key-value index and the transaction log and is the
/// single entry point for protocol commands:
///
/// - `GET`, `SET`, `UNSET`, `NUMEQUALTO` go to the index
/// - `BEGIN`, `ROLLBACK`, `COMMIT` go to the log
///
/// Every SET/UNSET outside of rollback replay hands the value it displaced
/// to the log, which keeps it as a compensation if a transaction is open.
///
/// # Example
///
/// ```rust
/// use txkv_core::Database;
///
/// let mut db = Database::new();
/// db.begin().unwrap();
/// db.set("a", "1");
/// db.begin().unwrap();
/// db.set("a", "2");
///
/// db.rollback().unwrap();
/// assert_eq!(db.get("a"), Some("1"));
///
/// db.rollback().unwrap();
/// assert_eq!(db.get("a"), None);
/// ```
#[derive(Debug, Default)]
pub struct Database {
    /// Configuration.
    config: Config,
    /// Forward and reverse mappings.
    index: KeyValueIndex,
    /// Open transaction blocks.
    log: TransactionLog,
    /// Operation counters.
    stats: DatabaseStats,
}

impl Database {
    /// Creates an empty database with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty database with custom configuration.
    ///
    /// ```rust
    /// use txkv_core::{Config, CoreError, Database};
    ///
    /// let mut db = Database::with_config(Config::new().max_transaction_depth(Some(1)));
    /// db.begin().unwrap();
    /// assert!(matches!(
    ///     db.begin(),
    ///     Err(CoreError::TransactionDepthExceeded { limit: 1 })
    /// ));
    /// ```
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            log: TransactionLog::with_max_depth(config.max_transaction_depth),
            config,
            index: KeyValueIndex::new(),
            stats: DatabaseStats::new(),
        }
    }

    /// Executes one protocol command.
    ///
    /// `END` returns [`Response::End`] and leaves the state untouched.
    ///
    /// # Errors
    ///
    /// - `NoTransaction` for ROLLBACK/COMMIT with nothing open
    /// - `TransactionDepthExceeded` for BEGIN beyond the configured limit
    pub fn execute(&mut self, command: Command) -> CoreResult<Response> {
        trace!(%command, "execute");
        self.dispatch(command, Mode::Normal)
    }

    fn dispatch(&mut self, command: Command, mode: Mode) -> CoreResult<Response> {
        match command {
            Command::Get { key } => {
                self.count(DatabaseStats::record_get);
                Ok(Response::Value(self.index.get(&key).map(str::to_string)))
            }
            Command::Set { key, value } => {
                self.apply_set(key, value, mode);
                Ok(Response::None)
            }
            Command::Unset { key } => {
                self.apply_unset(key, mode);
                Ok(Response::None)
            }
            Command::NumEqualTo { value } => {
                self.count(DatabaseStats::record_num_equal_to);
                Ok(Response::Count(self.index.count_equal_to(&value)))
            }
            Command::Begin => self.begin().map(|()| Response::None),
            Command::Rollback => self.rollback().map(|()| Response::None),
            Command::Commit => self.commit().map(|()| Response::None),
            Command::End => Ok(Response::End),
        }
    }

    fn apply_set(&mut self, key: String, value: String, mode: Mode) {
        let prior = self.index.set(key.clone(), value);
        if mode == Mode::Normal {
            self.count(DatabaseStats::record_set);
            self.record(Compensation::restoring(key, prior));
        }
    }

    fn apply_unset(&mut self, key: String, mode: Mode) {
        let prior = self.index.unset(&key);
        if mode == Mode::Normal {
            self.count(DatabaseStats::record_unset);
            // Unsetting an absent key changes nothing, so there is nothing to undo.
            if let Some(prior_value) = prior {
                self.record(Compensation::Set { key, prior_value });
            }
        }
    }

    fn record(&mut self, compensation: Compensation) {
        trace!(?compensation, depth = self.log.depth(), "record compensation");
        if self.log.record_if_open(compensation) {
            self.count(DatabaseStats::record_compensation);
        }
    }

    fn count(&mut self, record: impl FnOnce(&mut DatabaseStats)) {
        if self.config.collect_stats {
            record(&mut self.stats);
        }
    }

    /// Returns the current value of `key`.
    ///
    /// Reads through this method are not counted in [`DatabaseStats`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key)
    }

    /// Sets `key` to `value`, recording the undo if a transaction is open.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.apply_set(key.into(), value.into(), Mode::Normal);
    }

    /// Removes `key`, recording the undo if a transaction is open.
    pub fn unset(&mut self, key: impl Into<String>) {
        self.apply_unset(key.into(), Mode::Normal);
    }

    /// Returns how many keys currently hold `value`.
    #[must_use]
    pub fn num_equal_to(&self, value: &str) -> usize {
        self.index.count_equal_to(value)
    }

    /// Opens a new (possibly nested) transaction.
    ///
    /// # Errors
    ///
    /// Returns `TransactionDepthExceeded` if a depth limit is configured
    /// and already reached.
    pub fn begin(&mut self) -> CoreResult<()> {
        self.log.begin()?;
        self.count(DatabaseStats::record_begin);
        debug!(depth = self.log.depth(), "begin transaction");
        Ok(())
    }

    /// Undoes every mutation made since the innermost BEGIN.
    ///
    /// Compensations are replayed newest-first through the normal dispatch
    /// path in replay mode, so they are not recorded into outer blocks.
    ///
    /// # Errors
    ///
    /// Returns `NoTransaction` if no transaction is open; nothing changes.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let block = match self.log.rollback() {
            Ok(block) => block,
            Err(err) => {
                self.count(DatabaseStats::record_no_transaction);
                return Err(err);
            }
        };

        let replayed = block.len();
        for compensation in block.into_replay() {
            trace!(?compensation, "replay compensation");
            self.dispatch(compensation.into(), Mode::Replay)?;
        }

        self.count(|stats| stats.record_rollback(replayed));
        debug!(
            replayed,
            depth = self.log.depth(),
            "rolled back transaction"
        );
        Ok(())
    }

    /// Makes every pending mutation permanent and closes all open
    /// transactions, however deeply nested.
    ///
    /// # Errors
    ///
    /// Returns `NoTransaction` if no transaction is open.
    pub fn commit(&mut self) -> CoreResult<()> {
        match self.log.commit() {
            Ok(closed) => {
                self.count(DatabaseStats::record_commit);
                debug!(closed, "committed transactions");
                Ok(())
            }
            Err(err) => {
                self.count(DatabaseStats::record_no_transaction);
                Err(err)
            }
        }
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn transaction_depth(&self) -> usize {
        self.log.depth()
    }

    /// Returns the key-value index.
    #[must_use]
    pub fn index(&self) -> &KeyValueIndex {
        &self.index
    }

    /// Returns the transaction log.
    #[must_use]
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &DatabaseStats {
        &self.stats
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
