//! Nested transactions built from compensating commands.
//!
//! Every mutation made while a transaction is open records the command that
//! undoes it. A transaction block is the list of those compensations since
//! its BEGIN:
//! - **Rollback** replays the innermost block newest-first, then drops it
//! - **Commit** drops every block, making all pending mutations permanent

mod block;
mod log;

pub use block::{Compensation, TransactionBlock};
pub use log::TransactionLog;
