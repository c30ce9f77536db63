//! Benchmark support for TxKV.

pub mod utils;
