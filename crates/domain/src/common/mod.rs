//! Common utility functions shared by the domain and its adapters.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **No dependencies** - plain string handling

pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use string::{leading_integer, none_if_blank, split_delimited};
