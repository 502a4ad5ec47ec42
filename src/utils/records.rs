//! Line-oriented record loading.
//!
//! The index has no persisted layout of its own; the CLI rebuilds it from
//! a source file on every invocation by replaying `insert_record`. One
//! line is one record, with 1-based line numbers as record ids.

use crate::index::types::{Record, RecordId};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load `path` as one record per line. Empty lines are kept so that
/// record ids stay equal to line numbers.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;

    Ok(content
        .lines()
        .enumerate()
        .map(|(i, line)| Record {
            id: (i + 1) as RecordId,
            text: line.to_string(),
        })
        .collect())
}
