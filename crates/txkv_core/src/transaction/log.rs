//! Transaction log.

use crate::error::{CoreError, CoreResult};
use crate::transaction::block::{Compensation, TransactionBlock};

/// Stack of open transaction blocks; the last one is innermost.
///
/// The log only stores compensations. Replaying a block against the index
/// is the caller's job, since replay goes through the full dispatch path.
///
/// An empty stack means no transaction is open.
#[derive(Debug, Default, Clone)]
pub struct TransactionLog {
    /// Open blocks, outermost first.
    blocks: Vec<TransactionBlock>,
    /// Nesting limit (`None` = unbounded).
    max_depth: Option<usize>,
}

impl TransactionLog {
    /// Creates an empty, unbounded log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log that refuses to nest deeper than `max_depth`.
    #[must_use]
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            blocks: Vec::new(),
            max_depth,
        }
    }

    /// Opens a new innermost block.
    pub fn begin(&mut self) -> CoreResult<()> {
        if let Some(limit) = self.max_depth {
            if self.blocks.len() >= limit {
                return Err(CoreError::TransactionDepthExceeded { limit });
            }
        }
        self.blocks.push(TransactionBlock::new());
        Ok(())
    }

    /// Appends `compensation` to the innermost block.
    ///
    /// Returns false, and records nothing, if no transaction is open.
    pub fn record_if_open(&mut self, compensation: Compensation) -> bool {
        match self.blocks.last_mut() {
            Some(block) => {
                block.push(compensation);
                true
            }
            None => false,
        }
    }

    /// Removes the innermost block and hands it back for replay.
    pub fn rollback(&mut self) -> CoreResult<TransactionBlock> {
        self.blocks.pop().ok_or(CoreError::NoTransaction)
    }

    /// Discards every open block, returning how many were closed.
    ///
    /// All nesting levels are finalized at once; there is no partial commit.
    pub fn commit(&mut self) -> CoreResult<usize> {
        if self.blocks.is_empty() {
            return Err(CoreError::NoTransaction);
        }
        let depth = self.blocks.len();
        self.blocks.clear();
        Ok(depth)
    }

    /// Returns the number of open blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// Returns the total number of compensations across all open blocks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.blocks.iter().map(TransactionBlock::len).sum()
    }

    /// Returns the innermost block, if any.
    #[must_use]
    pub fn innermost(&self) -> Option<&TransactionBlock> {
        self.blocks.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unset(key: &str) -> Compensation {
        Compensation::restoring(key, None)
    }

    #[test]
    fn new_log_is_closed() {
        let log = TransactionLog::new();
        assert!(!log.is_open());
        assert_eq!(log.depth(), 0);
    }

    #[test]
    fn record_without_transaction_is_noop() {
        let mut log = TransactionLog::new();
        assert!(!log.record_if_open(unset("a")));
        assert_eq!(log.pending(), 0);
    }

    #[test]
    fn record_goes_to_innermost_block() {
        let mut log = TransactionLog::new();
        log.begin().unwrap();
        log.record_if_open(unset("a"));
        log.begin().unwrap();
        log.record_if_open(unset("b"));
        log.record_if_open(unset("c"));

        assert_eq!(log.depth(), 2);
        assert_eq!(log.innermost().map(TransactionBlock::len), Some(2));
        assert_eq!(log.pending(), 3);
    }

    #[test]
    fn rollback_pops_one_block() {
        let mut log = TransactionLog::new();
        log.begin().unwrap();
        log.record_if_open(unset("a"));
        log.begin().unwrap();
        log.record_if_open(unset("b"));

        let block = log.rollback().unwrap();
        assert_eq!(block.iter().next().map(Compensation::key), Some("b"));
        assert_eq!(log.depth(), 1);
        assert_eq!(log.pending(), 1);
    }

    #[test]
    fn rollback_without_transaction() {
        let mut log = TransactionLog::new();
        assert_eq!(log.rollback().unwrap_err(), CoreError::NoTransaction);
    }

    #[test]
    fn commit_clears_all_levels() {
        let mut log = TransactionLog::new();
        log.begin().unwrap();
        log.begin().unwrap();
        log.begin().unwrap();

        assert_eq!(log.commit().unwrap(), 3);
        assert!(!log.is_open());
        assert_eq!(log.commit().unwrap_err(), CoreError::NoTransaction);
    }

    #[test]
    fn empty_block_rolls_back() {
        let mut log = TransactionLog::new();
        log.begin().unwrap();
        let block = log.rollback().unwrap();
        assert!(block.is_empty());
    }

    #[test]
    fn depth_limit() {
        let mut log = TransactionLog::with_max_depth(Some(2));
        log.begin().unwrap();
        log.begin().unwrap();
        assert_eq!(
            log.begin().unwrap_err(),
            CoreError::TransactionDepthExceeded { limit: 2 }
        );
        assert_eq!(log.depth(), 2);
    }
}
