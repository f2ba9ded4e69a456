//! Shared utilities.
//!
//! Lexical path helpers and test fixtures.

pub mod path;
