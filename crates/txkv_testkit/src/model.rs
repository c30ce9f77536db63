//! Reference model for differential testing.
//!
//! The model implements the same protocol the simplest possible way: BEGIN
//! snapshots the whole map, ROLLBACK restores the latest snapshot, and
//! NUMEQUALTO scans every entry. It is slow but obviously correct, which
//! makes it a good oracle for the compensation-based engine.

use std::collections::BTreeMap;
use txkv_core::Command;

/// Snapshot-based model of a TxKV store.
#[derive(Debug, Default, Clone)]
pub struct ReferenceModel {
    entries: BTreeMap<String, String>,
    snapshots: Vec<BTreeMap<String, String>>,
}

impl ReferenceModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `command`, returning the line it prints, if any.
    ///
    /// `END` is treated as a no-op; stopping is the caller's concern.
    pub fn apply(&mut self, command: &Command) -> Option<String> {
        match command {
            Command::Set { key, value } => {
                self.entries.insert(key.clone(), value.clone());
                None
            }
            Command::Get { key } => Some(
                self.entries
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| "NULL".to_string()),
            ),
            Command::Unset { key } => {
                self.entries.remove(key);
                None
            }
            Command::NumEqualTo { value } => Some(self.count(value).to_string()),
            Command::Begin => {
                self.snapshots.push(self.entries.clone());
                None
            }
            Command::Rollback => match self.snapshots.pop() {
                Some(snapshot) => {
                    self.entries = snapshot;
                    None
                }
                None => Some("NO TRANSACTION".to_string()),
            },
            Command::Commit => {
                if self.snapshots.is_empty() {
                    Some("NO TRANSACTION".to_string())
                } else {
                    self.snapshots.clear();
                    None
                }
            }
            Command::End => None,
        }
    }

    /// Returns the current value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Counts keys holding `value` by scanning every entry.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.entries.values().filter(|v| *v == value).count()
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns all entries in key order.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}
