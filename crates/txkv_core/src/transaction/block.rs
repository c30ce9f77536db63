//! Compensating commands and the blocks that hold them.

use crate::command::Command;

/// A recorded inverse of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Restore `key` to the value it held before the mutation.
    Set {
        /// Key that was mutated.
        key: String,
        /// Value the key held before.
        prior_value: String,
    },
    /// Remove `key`, which did not exist before the mutation.
    Unset {
        /// Key that was created.
        key: String,
    },
}

impl Compensation {
    /// Builds the compensation for a mutation of `key` that displaced `prior`.
    #[must_use]
    pub fn restoring(key: impl Into<String>, prior: Option<String>) -> Self {
        let key = key.into();
        match prior {
            Some(prior_value) => Self::Set { key, prior_value },
            None => Self::Unset { key },
        }
    }

    /// Returns the key this compensation touches.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key, .. } | Self::Unset { key } => key,
        }
    }
}

impl From<Compensation> for Command {
    fn from(compensation: Compensation) -> Self {
        match compensation {
            Compensation::Set { key, prior_value } => Command::Set {
                key,
                value: prior_value,
            },
            Compensation::Unset { key } => Command::Unset { key },
        }
    }
}

/// Compensations recorded since one BEGIN, oldest first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionBlock {
    compensations: Vec<Compensation>,
}

impl TransactionBlock {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a compensation.
    pub fn push(&mut self, compensation: Compensation) {
        self.compensations.push(compensation);
    }

    /// Returns the number of recorded compensations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compensations.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compensations.is_empty()
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Compensation> {
        self.compensations.iter()
    }

    /// Consumes the block, yielding compensations in replay order
    /// (newest first).
    pub fn into_replay(self) -> impl Iterator<Item = Compensation> {
        self.compensations.into_iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restoring_prior_value() {
        let comp = Compensation::restoring("a", Some("10".into()));
        assert_eq!(
            comp,
            Compensation::Set {
                key: "a".into(),
                prior_value: "10".into()
            }
        );
        assert_eq!(comp.key(), "a");
    }

    #[test]
    fn restoring_absence() {
        let comp = Compensation::restoring("a", None);
        assert_eq!(comp, Compensation::Unset { key: "a".into() });
    }

    #[test]
    fn converts_to_command() {
        let set: Command = Compensation::restoring("a", Some("1".into())).into();
        assert_eq!(set.to_string(), "SET a 1");

        let unset: Command = Compensation::restoring("a", None).into();
        assert_eq!(unset.to_string(), "UNSET a");
    }

    #[test]
    fn replay_order_is_newest_first() {
        let mut block = TransactionBlock::new();
        block.push(Compensation::restoring("a", None));
        block.push(Compensation::restoring("a", Some("1".into())));
        assert_eq!(block.len(), 2);

        let is_set: Vec<_> = block
            .into_replay()
            .map(|c| matches!(c, Compensation::Set { .. }))
            .collect();
        assert_eq!(is_set, vec![true, false]);
    }
}
