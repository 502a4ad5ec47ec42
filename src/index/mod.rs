pub mod arena;
pub mod order;
pub mod skiplist;
pub mod suffix;
pub mod types;

pub use suffix::SuffixIndex;
pub use types::{IndexStats, Record, RecordId, SuffixIndexConfig};
