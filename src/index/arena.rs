//! Node arena - id-indexed storage for all skip-list nodes.
//!
//! The arena is the sole owner of node memory. Everything above it (the
//! skip list's forward chains, a key's `next` reference) holds plain
//! integer ids, never direct references, so the structure has no cyclic
//! ownership even though the chains themselves form long reference graphs.
//!
//! Ids are allocated monotonically starting at 1 and are never reused,
//! even after the node is deleted. That makes an id safe to use as a
//! tie-breaker or deduplication key for the lifetime of the process.

use crate::index::types::Key;
use rustc_hash::FxHashMap;
use std::fmt;

/// Stable identifier for a node in the arena.
///
/// Two reserved values denote the skip list's head and tail sentinels;
/// they are never returned by [`Arena::allocate_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The head sentinel, ordered before every real key.
    pub const HEAD: NodeId = NodeId(0);
    /// The tail sentinel, ordered after every real key.
    pub const TAIL: NodeId = NodeId(u32::MAX);

    pub fn is_sentinel(self) -> bool {
        self == Self::HEAD || self == Self::TAIL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NodeId::HEAD => write!(f, "head"),
            NodeId::TAIL => write!(f, "tail"),
            NodeId(n) => write!(f, "{}", n),
        }
    }
}

/// A skip-list node: one key plus its per-level forward links.
///
/// `forward.len()` is the node's level count; the node is linked at the
/// contiguous level prefix `[0, forward.len())`. Sentinels carry no key.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// `None` only for the head and tail sentinels.
    pub key: Option<Key>,
    pub forward: Vec<NodeId>,
}

impl Node {
    pub fn level(&self) -> usize {
        self.forward.len()
    }
}

/// Owning store of all nodes, addressed by [`NodeId`].
#[derive(Debug, Default)]
pub struct Arena {
    nodes: FxHashMap<NodeId, Node>,
    last_id: u32,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a fresh id, monotonically increasing from 1. Ids are never
    /// reused, even after [`Arena::remove`].
    pub fn allocate_id(&mut self) -> NodeId {
        self.last_id += 1;
        debug_assert!(self.last_id < u32::MAX, "node id space exhausted");
        NodeId(self.last_id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Store `node` at its own id, overwriting any previous entry.
    pub fn put(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    /// Reclaim the slot for `id`. The id itself stays retired.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    /// Number of live nodes, sentinels included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
