//! # TxKV Testkit
//!
//! Test utilities for TxKV.
//!
//! This crate provides:
//! - Script fixtures that run protocol lines and collect the replies
//! - Property-based generators for command scripts using proptest
//! - A snapshot-based reference model for differential testing
//!
//! ## Usage
//!
//! ```rust
//! use txkv_testkit::prelude::*;
//!
//! let out = run_script("SET a 1\nGET a\nEND\n");
//! assert_eq!(out, ["1"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
