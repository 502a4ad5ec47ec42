//! Suffix index: record-level operations over the skip list.
//!
//! Each record contributes one key chain per suffix - one key per starting
//! character, linked through `next` down to a shared per-record
//! end-of-record marker. Construction order is load-bearing in both
//! directions:
//!
//! - **Insertion** proceeds shortest suffix to longest. A key's `next`
//!   must reference an already-inserted node, because the comparator walks
//!   through it during the insert's own lower bound.
//! - **Deletion** is the exact mirror: longest suffix first, end marker
//!   last. A key may only be deleted while every node its chain depends on
//!   is still alive, and it is split into an explicit two-phase protocol
//!   (reconstruct-and-validate, then delete) so the ordering is auditable
//!   on its own.

use crate::error::{IndexError, Result};
use crate::index::skiplist::SkipList;
use crate::index::types::{IndexStats, Key, RecordId, SuffixIndexConfig};
use rustc_hash::FxHashSet;

/// Substring-search index over a collection of text records.
///
/// Single-writer, single-reader: no operation is reentrant against
/// another, and the index holds no internal locking.
pub struct SuffixIndex {
    list: SkipList,
    records: FxHashSet<RecordId>,
}

impl SuffixIndex {
    pub fn new(config: SuffixIndexConfig) -> Self {
        Self {
            list: SkipList::new(&config),
            records: FxHashSet::default(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SuffixIndexConfig::default())
    }

    /// Count of indexed suffix + end-of-record keys.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of records currently indexed.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            record_count: self.records.len(),
            entry_count: self.list.len(),
            arena_nodes: self.list.arena().len(),
            max_level: self.list.max_level(),
        }
    }

    /// Index `text` under `record`. Inserts the end-of-record marker
    /// first, then one key per column from the last character backward,
    /// each referencing the node returned for the previous (later) column.
    ///
    /// Re-inserting an identical `(record, text)` pair is a no-op. The
    /// text for an id must stay stable until [`SuffixIndex::delete_record`];
    /// the index stores keys only, so it cannot detect a changed text
    /// under a reused id.
    pub fn insert_record(&mut self, record: RecordId, text: &str) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        let mut prev = self.list.insert(Key::end_of_record(record))?;
        for column in (0..chars.len()).rev() {
            prev = self.list.insert(Key {
                ch: Some(chars[column]),
                record,
                column: column as i32,
                next: Some(prev),
            })?;
        }
        self.records.insert(record);
        Ok(())
    }

    /// Remove the record previously indexed as `(record, text)`.
    ///
    /// Phase 1 reconstructs the full key chain from the end-of-record
    /// marker outward, recovering each key's `next` id by exact lookup; a
    /// missing node means the caller's text does not match what was
    /// inserted, and nothing has been deleted yet. Phase 2 then deletes
    /// longest suffix first, end marker last, so every key's chain stays
    /// resolvable during its own removal.
    pub fn delete_record(&mut self, record: RecordId, text: &str) -> Result<()> {
        if !self.records.contains(&record) {
            return Err(IndexError::RecordNotFound { record });
        }

        let chars: Vec<char> = text.chars().collect();

        // Phase 1: reconstruct and validate, shortest suffix to longest.
        let marker = Key::end_of_record(record);
        let mut prev = self
            .list
            .get_node(&marker)?
            .ok_or(IndexError::RecordNotFound { record })?
            .id;
        let mut chain = Vec::with_capacity(chars.len() + 1);
        chain.push(marker);
        for column in (0..chars.len()).rev() {
            let key = Key {
                ch: Some(chars[column]),
                record,
                column: column as i32,
                next: Some(prev),
            };
            prev = self
                .list
                .get_node(&key)?
                .ok_or(IndexError::RecordMismatch {
                    record,
                    column: column as i32,
                })?
                .id;
            chain.push(key);
        }

        // Phase 2: delete in reverse reconstruction order - column 0
        // first, end-of-record marker last.
        for key in chain.iter().rev() {
            self.list.delete(key)?;
        }

        self.records.remove(&record);
        Ok(())
    }

    /// Ids of up to `max_results` distinct records containing `pattern` as
    /// a substring, in list scan order. The order carries no guarantee
    /// beyond "a subset of the true match set, truncated at the cap".
    pub fn query(&self, pattern: &str, max_results: usize) -> Result<Vec<RecordId>> {
        if self.list.is_empty() {
            return Err(IndexError::EmptyIndex);
        }
        let chars: Vec<char> = pattern.chars().collect();
        if chars.is_empty() {
            return Err(IndexError::EmptyPattern);
        }

        let candidates = self.list.scan_prefix(&chars, max_results)?;
        let mut matches = Vec::new();
        for key in &candidates {
            if !self.list.key_matches_prefix(key, &chars)? {
                // Matching suffixes are contiguous in sorted order; once
                // the scan diverges from the pattern nothing later can
                // match.
                break;
            }
            matches.push(key.record);
        }
        Ok(matches)
    }
}
