//! Error types for the suffix index.
//!
//! Two classes of failure are kept distinguishable:
//!
//! - **Caller-contract violations** - the caller's view of the index has
//!   drifted from its own record store (deleting text that was never
//!   inserted, querying an empty index). Recoverable by the caller.
//! - **Internal-consistency failures** - an id referenced by a live
//!   `forward`/`next` pointer cannot be resolved in the arena. These mean
//!   the index itself is broken; the operation is aborted rather than
//!   patched over, since continuing would compound the corruption.

use crate::index::arena::NodeId;
use crate::index::types::RecordId;
use thiserror::Error;

/// Result type alias using IndexError.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur in suffix-index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    // Caller-contract violations
    #[error("record {record} not found in index")]
    RecordNotFound { record: RecordId },

    #[error("record {record} does not match indexed text at column {column}")]
    RecordMismatch { record: RecordId, column: i32 },

    #[error("key for record {record} column {column} not present in list")]
    KeyNotFound { record: RecordId, column: i32 },

    #[error("query against an empty index")]
    EmptyIndex,

    #[error("empty query pattern")]
    EmptyPattern,

    // Internal-consistency failures
    #[error("node {0} referenced but unresolvable in arena")]
    NodeUnresolved(NodeId),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IndexError {
    /// True for failures that indicate a broken invariant inside the index
    /// rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, IndexError::NodeUnresolved(_) | IndexError::Internal(_))
    }
}
