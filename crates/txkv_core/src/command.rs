//! Protocol commands and their replies.
//!
//! A command line is a keyword followed by up to two arguments, separated
//! by single spaces. Keywords are case-sensitive.

use std::fmt;
use thiserror::Error;

/// Message printed for any line that is not a valid command.
pub const INPUT_ERROR_MESSAGE: &str =
    "Please enter a valid input. Note that input is case sensitive.";

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// `SET key value`
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// `GET key`
    Get {
        /// Key to read.
        key: String,
    },
    /// `UNSET key`
    Unset {
        /// Key to remove.
        key: String,
    },
    /// `NUMEQUALTO value`
    NumEqualTo {
        /// Value to count.
        value: String,
    },
    /// `BEGIN`
    Begin,
    /// `ROLLBACK`
    Rollback,
    /// `COMMIT`
    Commit,
    /// `END`
    End,
}

/// Reasons a line fails to parse.
///
/// Every variant renders as the same fixed input-error message; the
/// variant itself is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has no tokens.
    #[error("{}", INPUT_ERROR_MESSAGE)]
    Empty,

    /// The line has more than three tokens.
    #[error("{}", INPUT_ERROR_MESSAGE)]
    TooManyTokens {
        /// Number of tokens found.
        count: usize,
    },

    /// The keyword is not recognized for the given arity.
    #[error("{}", INPUT_ERROR_MESSAGE)]
    UnknownCommand {
        /// The first token of the line.
        keyword: String,
        /// Total token count, keyword included.
        arity: usize,
    },
}

impl Command {
    /// Parses one protocol line.
    ///
    /// Tokens are split on single spaces. Trailing empty tokens are dropped,
    /// so `"GET a "` parses, while `"GET  a"` has three tokens and does not.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens: Vec<&str> = line.split(' ').collect();
        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }

        match tokens.as_slice() {
            [] => Err(ParseError::Empty),
            ["END"] => Ok(Self::End),
            ["BEGIN"] => Ok(Self::Begin),
            ["ROLLBACK"] => Ok(Self::Rollback),
            ["COMMIT"] => Ok(Self::Commit),
            ["GET", key] => Ok(Self::Get {
                key: (*key).to_string(),
            }),
            ["UNSET", key] => Ok(Self::Unset {
                key: (*key).to_string(),
            }),
            ["NUMEQUALTO", value] => Ok(Self::NumEqualTo {
                value: (*value).to_string(),
            }),
            ["SET", key, value] => Ok(Self::Set {
                key: (*key).to_string(),
                value: (*value).to_string(),
            }),
            [keyword, ..] if tokens.len() <= 3 => Err(ParseError::UnknownCommand {
                keyword: (*keyword).to_string(),
                arity: tokens.len(),
            }),
            _ => Err(ParseError::TooManyTokens {
                count: tokens.len(),
            }),
        }
    }

    /// Returns the protocol keyword of this command.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Set { .. } => "SET",
            Self::Get { .. } => "GET",
            Self::Unset { .. } => "UNSET",
            Self::NumEqualTo { .. } => "NUMEQUALTO",
            Self::Begin => "BEGIN",
            Self::Rollback => "ROLLBACK",
            Self::Commit => "COMMIT",
            Self::End => "END",
        }
    }

    /// Returns true for commands that change the key-value index.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Set { .. } | Self::Unset { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { key, value } => write!(f, "SET {key} {value}"),
            Self::Get { key } => write!(f, "GET {key}"),
            Self::Unset { key } => write!(f, "UNSET {key}"),
            Self::NumEqualTo { value } => write!(f, "NUMEQUALTO {value}"),
            other => f.write_str(other.keyword()),
        }
    }
}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The outcome of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The command produces no output.
    None,
    /// Reply to GET; `None` prints as `NULL`.
    Value(Option<String>),
    /// Reply to NUMEQUALTO.
    Count(usize),
    /// END was received; the read loop should stop.
    End,
}

impl Response {
    /// Returns the line to print for this response, if any.
    #[must_use]
    pub fn output(&self) -> Option<String> {
        match self {
            Self::None | Self::End => None,
            Self::Value(Some(value)) => Some(value.clone()),
            Self::Value(None) => Some("NULL".to_string()),
            Self::Count(count) => Some(count.to_string()),
        }
    }
}
