//! # TxKV Core
//!
//! Core engine for TxKV, an in-memory key-value store with nested
//! transactions.
//!
//! This crate provides:
//! - A key-value index with a reverse (value → count) mapping
//! - A transaction log of compensating commands for nested rollback
//! - The command model and line parser for the TxKV protocol
//! - A `Database` facade that dispatches parsed commands
//!
//! ```rust
//! use txkv_core::{Command, Database, Response};
//!
//! let mut db = Database::new();
//! db.execute(Command::parse("SET a 10").unwrap()).unwrap();
//! db.execute(Command::Begin).unwrap();
//! db.execute(Command::parse("SET a 20").unwrap()).unwrap();
//! db.execute(Command::Rollback).unwrap();
//!
//! let reply = db.execute(Command::parse("GET a").unwrap()).unwrap();
//! assert_eq!(reply, Response::Value(Some("10".to_string())));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod config;
mod database;
mod error;
mod index;
pub mod protocol;
mod shared;
mod stats;
mod transaction;

pub use command::{Command, ParseError, Response};
pub use config::Config;
pub use database::Database;
pub use error::{CoreError, CoreResult};
pub use index::KeyValueIndex;
pub use shared::SharedDatabase;
pub use stats::DatabaseStats;
pub use transaction::{Compensation, TransactionBlock, TransactionLog};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
