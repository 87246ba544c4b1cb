//! Binary search trees over injected codecs and comparators.
//!
//! - [`FileTree`] - Nodes live in a [`NodeStore`](crate::storage::NodeStore),
//!   linked by byte offset
//! - [`MemoryTree`] - Same algorithm over an in-memory arena

mod file_tree;
mod memory_tree;

pub use file_tree::{FileTree, Traverse};
pub use memory_tree::{MemoryTraverse, MemoryTree};
