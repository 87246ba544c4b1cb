//! Node - one tree element and its on-disk block layout.

use crate::common::config::{LINK_SIZE, NODE_OVERHEAD};
use crate::common::Link;

/// Which child link of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A tree node as stored in the backing file.
///
/// `address` is fixed when the node is first written. Only the three links
/// change afterwards.
///
/// # Block Layout
/// ```text
/// Offset        Size        Field
/// ------        ----        -----
/// 0             block_size  value (codec-encoded)
/// block_size    8           parent link (i64, little-endian)
/// block_size+8  8           left link
/// block_size+16 8           right link
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub address: Link,
    pub value: T,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<T> Node<T> {
    /// Create a childless node.
    pub fn new(address: Link, value: T, parent: Link) -> Self {
        Self {
            address,
            value,
            parent,
            left: Link::NULL,
            right: Link::NULL,
        }
    }

    /// The child link on `side`.
    #[inline]
    pub fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Point the child link on `side` at `link`.
    #[inline]
    pub fn set_child(&mut self, side: Side, link: Link) {
        match side {
            Side::Left => self.left = link,
            Side::Right => self.right = link,
        }
    }
}

/// The three links trailing the data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeLinks {
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl NodeLinks {
    pub const SIZE: usize = NODE_OVERHEAD;

    const OFFSET_PARENT: usize = 0;
    const OFFSET_LEFT: usize = LINK_SIZE;
    const OFFSET_RIGHT: usize = LINK_SIZE * 2;

    /// Read links from the start of `data`.
    ///
    /// # Panics
    /// Panics if `data.len() < NodeLinks::SIZE`.
    pub fn from_bytes(data: &[u8]) -> Self {
        assert!(data.len() >= Self::SIZE, "buffer too small for NodeLinks");

        Self {
            parent: read_link(data, Self::OFFSET_PARENT),
            left: read_link(data, Self::OFFSET_LEFT),
            right: read_link(data, Self::OFFSET_RIGHT),
        }
    }

    /// Write links to the start of `data`.
    ///
    /// # Panics
    /// Panics if `data.len() < NodeLinks::SIZE`.
    pub fn write_to(&self, data: &mut [u8]) {
        assert!(data.len() >= Self::SIZE, "buffer too small for NodeLinks");

        data[Self::OFFSET_PARENT..Self::OFFSET_PARENT + LINK_SIZE]
            .copy_from_slice(&self.parent.to_bytes());
        data[Self::OFFSET_LEFT..Self::OFFSET_LEFT + LINK_SIZE]
            .copy_from_slice(&self.left.to_bytes());
        data[Self::OFFSET_RIGHT..Self::OFFSET_RIGHT + LINK_SIZE]
            .copy_from_slice(&self.right.to_bytes());
    }
}

impl<T> From<&Node<T>> for NodeLinks {
    fn from(node: &Node<T>) -> Self {
        Self {
            parent: node.parent,
            left: node.left,
            right: node.right,
        }
    }
}

fn read_link(data: &[u8], offset: usize) -> Link {
    let mut bytes = [0u8; LINK_SIZE];
    bytes.copy_from_slice(&data[offset..offset + LINK_SIZE]);
    Link::from_bytes(bytes)
}
