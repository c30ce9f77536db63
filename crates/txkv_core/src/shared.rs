//! Thread-safe database handle.

use crate::command::{Command, Response};
use crate::config::Config;
use crate::database::Database;
use crate::error::CoreResult;
use crate::stats::DatabaseStats;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to one [`Database`] shared between threads.
///
/// The index and the transaction log are guarded together: each command
/// holds the lock from dispatch until its response (including any rollback
/// replay) is produced. Transactions are still per-store, not per-handle.
#[derive(Debug, Clone, Default)]
pub struct SharedDatabase {
    inner: Arc<Mutex<Database>>,
}

impl SharedDatabase {
    /// Creates a shared database with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_database(Database::new())
    }

    /// Creates a shared database with custom configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::from_database(Database::with_config(config))
    }

    /// Wraps an existing database.
    #[must_use]
    pub fn from_database(db: Database) -> Self {
        Self {
            inner: Arc::new(Mutex::new(db)),
        }
    }

    /// Executes one command atomically.
    pub fn execute(&self, command: Command) -> CoreResult<Response> {
        self.inner.lock().execute(command)
    }

    /// Runs `f` with exclusive access to the database.
    pub fn with<R>(&self, f: impl FnOnce(&mut Database) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Returns a copy of the current statistics.
    #[must_use]
    pub fn stats(&self) -> DatabaseStats {
        *self.inner.lock().stats()
    }
}
