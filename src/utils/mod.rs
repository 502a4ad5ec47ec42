//! Shared utilities.
//!
//! - [`records`] - Loading line-oriented record files for the CLI

pub mod records;

pub use records::*;
