//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that overwrites,
//! shared values and rollbacks of the same key happen often.

use proptest::prelude::*;
use txkv_core::Command;

/// Strategy for generating keys from a small pool.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]").expect("Invalid regex")
}

/// Strategy for generating values from a small pool.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-3]").expect("Invalid regex")
}

/// Strategy for generating one command other than `END`.
pub fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Command::Set { key, value }),
        2 => key_strategy().prop_map(|key| Command::Get { key }),
        2 => key_strategy().prop_map(|key| Command::Unset { key }),
        2 => value_strategy().prop_map(|value| Command::NumEqualTo { value }),
        2 => Just(Command::Begin),
        1 => Just(Command::Rollback),
        1 => Just(Command::Commit),
    ]
}

/// Strategy for generating a command script.
pub fn command_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(command_strategy(), min_ops..max_ops)
}

/// Strategy for generating mutations only (`SET`/`UNSET`).
pub fn mutation_sequence_strategy(max_ops: usize) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(
        prop_oneof![
            3 => (key_strategy(), value_strategy())
                .prop_map(|(key, value)| Command::Set { key, value }),
            1 => key_strategy().prop_map(|key| Command::Unset { key }),
        ],
        0..max_ops,
    )
}

/// Strategy for generating arbitrary input lines, valid or not.
pub fn input_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => command_strategy().prop_map(|command| command.to_string()),
        1 => prop::string::string_regex("[A-Za-z ]{0,16}").expect("Invalid regex"),
    ]
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
