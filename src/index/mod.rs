//! Ordered index subsystem
//!
//! A red-black tree keyed by `BookId` whose nodes each own a payload (the
//! catalog record). Provides point lookup, ordered insert/delete with
//! rebalancing, pruned range scans, and nearest-key search.
//!
//! # Invariants
//!
//! Checked by `OrderedIndex::validate` and expected to hold after every
//! insert or remove:
//!
//! - Root and NIL sentinel are black
//! - No red node has a red child
//! - Every root-to-NIL path has the same black-height
//! - In-order traversal is strictly increasing
//!
//! # Rotation counter
//!
//! `rotation_count()` grows by one per rotation and by one per recoloring
//! step inside the insert/delete fixups. Lookups never change it.

mod errors;
mod rbtree;
mod validate;

pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use rbtree::{Color, Iter, Nearest, NodeHandle, OrderedIndex};
