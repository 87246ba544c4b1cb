//! Storage layer - node blocks on disk.
//!
//! This module handles persistent storage:
//! - [`NodeStore`] - Block-level file I/O and locking
//! - [`Node`] - A tree node and its block layout
//! - [`IoStats`] - Block read/write counters

mod node;
mod node_store;
mod stats;

pub use node::{Node, Side};
pub use node_store::NodeStore;
pub use stats::IoStats;
