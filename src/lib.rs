//! # SXI - Incremental Substring-Search Index
//!
//! SXI answers "which record ids contain substring S" over a growing and
//! shrinking collection of text records, without rescanning all text. It
//! is a generalized suffix index: every suffix of every record is stored
//! not as a string but as a chain of arena-indexed skip-list nodes, one
//! character per node, sharing the record's end marker. Per-character
//! insertion and deletion keep the index updatable in place.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - The arena, the skip list, and the suffix index layered on
//!   top (each layer depends only on the one below)
//! - [`error`] - Caller-contract vs internal-consistency error split
//! - [`output`] - Colored match printing for the CLI
//! - [`utils`] - Sample-file record loading
//!
//! ## Quick Start
//!
//! ```
//! use sxi::index::SuffixIndex;
//!
//! let mut index = SuffixIndex::with_defaults();
//! index.insert_record(2, "hello").unwrap();
//! index.insert_record(3, "helmets are cool").unwrap();
//!
//! let mut ids = index.query("hel", 10).unwrap();
//! ids.sort_unstable();
//! assert_eq!(ids, vec![2, 3]);
//!
//! index.delete_record(2, "hello").unwrap();
//! assert!(index.query("hello", 10).unwrap().is_empty());
//! ```
//!
//! ## Model
//!
//! Single-threaded and synchronous: no operation is reentrant against
//! another, and the index is rebuilt from source records on process start
//! (there is no persisted layout). Expected cost is O(log n) per key
//! touched and O(text length) keys per record operation.

pub mod error;
pub mod index;
pub mod output;
pub mod utils;
