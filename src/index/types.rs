//! Core types for the suffix index.

use crate::index::arena::NodeId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a record in the index
pub type RecordId = u32;

/// Column value of the synthetic end-of-record key
pub const END_COLUMN: i32 = -1;

/// The ordered, comparable value stored per skip-list node.
///
/// One key represents one character of one suffix of one record. `next`
/// is the id of the node holding the key for the immediately following
/// character of the same suffix; the chain ends at a per-record
/// end-of-record marker (`ch == None`, `column == -1`, `next == None`).
///
/// Ordering over keys is chain-lexicographic and lives in
/// [`crate::index::order`]; it walks through `next` via the arena, so a
/// key is only comparable while every node its chain references is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    /// The character this key represents; `None` for the end-of-record
    /// marker, which sorts before any character.
    pub ch: Option<char>,
    /// Owning record; stable across all keys of a chain.
    pub record: RecordId,
    /// Character offset within the record, or [`END_COLUMN`].
    pub column: i32,
    /// Node holding the following character's key, or `None` at the
    /// end-of-record marker.
    pub next: Option<NodeId>,
}

impl Key {
    /// The synthetic end-of-record key for `record`.
    pub fn end_of_record(record: RecordId) -> Self {
        Self {
            ch: None,
            record,
            column: END_COLUMN,
            next: None,
        }
    }

    pub fn is_end_of_record(&self) -> bool {
        self.ch.is_none()
    }
}

/// One input record: an id plus the text indexed under it.
///
/// The index never stores the text; deletion reconstructs key chains from
/// the text the caller supplies, which must equal what was inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub text: String,
}

/// Configuration for the skip list underlying the suffix index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixIndexConfig {
    /// Level-promotion probability (default: 0.5)
    pub p: f64,
    /// Level ceiling. The suffix index stores one key per character of
    /// every record, so this defaults higher than a generic key-value
    /// skip list would need (default: 24).
    pub max_level: usize,
    /// Seed for level draws; `None` seeds from entropy. Fixing it makes
    /// index shapes reproducible across runs.
    pub seed: Option<u64>,
}

impl Default for SuffixIndexConfig {
    fn default() -> Self {
        Self {
            p: 0.5,
            max_level: 24,
            seed: None,
        }
    }
}

/// Diagnostic snapshot of an index, serialized by the CLI `stats` command
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IndexStats {
    /// Number of records currently indexed
    pub record_count: usize,
    /// Number of suffix + end-of-record keys linked at level 0
    pub entry_count: usize,
    /// Live arena nodes, sentinels included
    pub arena_nodes: usize,
    /// Configured level ceiling
    pub max_level: usize,
}
