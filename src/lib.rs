//! treefile - a binary search tree persisted as fixed-size blocks in one file.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            treefile                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Tree Layer (tree/)                        │   │
//! │  │     FileTree: insert + in-order traverse over links      │   │
//! │  │     MemoryTree: same algorithm over an in-memory arena   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Storage Layer (storage/)                    │   │
//! │  │     NodeStore: seek + read/write node blocks by offset   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Codec Layer (codec/)                      │   │
//! │  │     RecordCodec: record ↔ fixed-size block               │   │
//! │  │     Comparator: three-way key order                      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Link, Error, config)
//! - [`codec`] - Record codecs and comparators
//! - [`storage`] - Node blocks on disk
//! - [`tree`] - File-backed and in-memory search trees
//!
//! # Quick Start
//! ```no_run
//! use treefile::codec::{compare_by_id, Person, PersonCodec};
//! use treefile::FileTree;
//!
//! // Open (or create) a tree file
//! let mut tree = FileTree::open("people.db", PersonCodec, compare_by_id).unwrap();
//!
//! // Insert and list in key order
//! tree.insert(Person::new(1, "Ada", 36)).unwrap();
//! for person in tree.traverse() {
//!     println!("{}", person.unwrap());
//! }
//! ```

pub mod codec;
pub mod common;
pub mod storage;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use codec::{Comparator, RecordCodec};
pub use common::{Error, Link, Result, StoreConfig};
pub use storage::{IoStats, Node, NodeStore};
pub use tree::{FileTree, MemoryTree};
