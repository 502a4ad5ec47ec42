//! Chain-lexicographic ordering for suffix keys.
//!
//! A key carries one character plus the id of the node holding the rest of
//! its suffix, so comparing two keys means walking both `next` chains
//! through the arena in lockstep until they diverge. The end-of-record
//! marker acts as "end of string": it sorts before any character, and two
//! markers order by record id, which is what keeps equal suffix text from
//! different records from colliding.
//!
//! Two orderings share the walk:
//!
//! - full chain vs. chain, used by insert/delete/exact lookup
//!   ([`chain_less`] via [`KeyTarget`]);
//! - chain vs. query pattern, used to position a prefix scan
//!   ([`PrefixTarget`]). The pattern behaves like a string with no
//!   terminator, so a key whose chain starts with the whole pattern is
//!   never "less" than it.
//!
//! Both agree with plain string comparison of the underlying suffix text;
//! the property tests below pin that down, since a disagreement would make
//! the scan positioning silently skip matches.
//!
//! The walks are iterative. A dangling `next` id is an arena-level fault
//! and surfaces as [`IndexError::NodeUnresolved`], never a panic.

use crate::error::{IndexError, Result};
use crate::index::arena::{Arena, NodeId};
use crate::index::types::Key;

/// Resolve the key stored at `id`, failing loudly on a dangling reference.
fn resolve_key(arena: &Arena, id: NodeId) -> Result<Key> {
    let node = arena.get(id).ok_or(IndexError::NodeUnresolved(id))?;
    node.key
        .ok_or_else(|| IndexError::Internal(format!("chain references sentinel node {}", id)))
}

/// Chain-lexicographic strict ordering: does `a` sort before `b`?
///
/// Ties on identical character sequences resolve by record id, then
/// column; two keys of the same record never carry the same column, so the
/// order is total.
pub fn chain_less(arena: &Arena, a: &Key, b: &Key) -> Result<bool> {
    let mut a = *a;
    let mut b = *b;
    loop {
        match (a.ch, b.ch) {
            // Both records terminate here; order by owner.
            (None, None) => return Ok((a.record, a.column) < (b.record, b.column)),
            // End of record sorts before any continuing string.
            (None, Some(_)) => return Ok(true),
            (Some(_), None) => return Ok(false),
            (Some(ca), Some(cb)) => {
                if ca != cb {
                    return Ok(ca < cb);
                }
                let (na, nb) = match (a.next, b.next) {
                    (Some(na), Some(nb)) => (na, nb),
                    _ => {
                        return Err(IndexError::Internal(format!(
                            "character key without next link (records {}, {})",
                            a.record, b.record
                        )));
                    }
                };
                // Shared tail node: the remaining text is identical, so
                // only the owner and position can break the tie.
                if na == nb {
                    return Ok((a.record, a.column) < (b.record, b.column));
                }
                a = resolve_key(arena, na)?;
                b = resolve_key(arena, nb)?;
            }
        }
    }
}

/// Key identity. Each `(record, column)` pair appears at most once in the
/// list, so no chain walk is needed; the character still participates so
/// that a reconstructed key built from mismatched text fails to resolve
/// instead of aliasing the stored key at the same column.
pub fn chain_same(a: &Key, b: &Key) -> bool {
    a.record == b.record && a.column == b.column && a.ch == b.ch
}

/// Does `key`'s suffix text sort strictly before `pattern`?
///
/// Equivalent to comparing the suffix string against the pattern string; a
/// suffix that has `pattern` as a prefix compares greater-or-equal, so the
/// lower bound under this ordering is the first potentially matching key.
pub fn precedes_pattern(arena: &Arena, key: &Key, pattern: &[char]) -> Result<bool> {
    let mut k = *key;
    let mut i = 0;
    loop {
        let c = match k.ch {
            // Record text ended; less only if the pattern still continues.
            None => return Ok(i < pattern.len()),
            Some(c) => c,
        };
        if i == pattern.len() {
            return Ok(false);
        }
        if c != pattern[i] {
            return Ok(c < pattern[i]);
        }
        i += 1;
        k = match k.next {
            Some(id) => resolve_key(arena, id)?,
            None => {
                return Err(IndexError::Internal(format!(
                    "character key without next link (record {})",
                    k.record
                )));
            }
        };
    }
}

/// Full verification: does the suffix starting at `key` contain `pattern`
/// as a prefix? A mismatch anywhere, or the chain ending early, is a miss.
pub fn matches_prefix(arena: &Arena, key: &Key, pattern: &[char]) -> Result<bool> {
    let mut k = *key;
    for &pc in pattern {
        match k.ch {
            None => return Ok(false),
            Some(c) if c != pc => return Ok(false),
            Some(_) => {}
        }
        k = match k.next {
            Some(id) => resolve_key(arena, id)?,
            None => {
                return Err(IndexError::Internal(format!(
                    "character key without next link (record {})",
                    k.record
                )));
            }
        };
    }
    Ok(true)
}

/// What a lower-bound traversal is searching toward: either a full chain
/// key or a query pattern. The skip list advances while the next key
/// precedes the target.
pub trait SearchTarget {
    /// Does `key` sort strictly before this target?
    fn key_precedes(&self, arena: &Arena, key: &Key) -> Result<bool>;
}

/// Full-chain target used by insert, delete, and exact lookup.
pub struct KeyTarget<'a>(pub &'a Key);

impl SearchTarget for KeyTarget<'_> {
    fn key_precedes(&self, arena: &Arena, key: &Key) -> Result<bool> {
        chain_less(arena, key, self.0)
    }
}

/// Prefix target used to position a query scan.
pub struct PrefixTarget<'a>(pub &'a [char]);

impl SearchTarget for PrefixTarget<'_> {
    fn key_precedes(&self, arena: &Arena, key: &Key) -> Result<bool> {
        precedes_pattern(arena, key, self.0)
    }
}
