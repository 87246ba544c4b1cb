//! In-memory binary search tree.
//!
//! Same insertion and traversal algorithm as [`FileTree`](super::FileTree),
//! with nodes held in a `Vec` arena and linked by index. Useful as a
//! reference when checking what the file-backed tree should contain.

use std::cmp::Ordering;

use crate::codec::{three_way, Comparator};
use crate::common::{Error, Result};
use crate::storage::Side;

struct MemoryNode<T> {
    value: T,
    left: Option<usize>,
    right: Option<usize>,
}

impl<T> MemoryNode<T> {
    fn child(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn set_child(&mut self, side: Side, index: usize) {
        match side {
            Side::Left => self.left = Some(index),
            Side::Right => self.right = Some(index),
        }
    }
}

/// An unbalanced binary search tree held in memory.
///
/// # Example
/// ```
/// use treefile::MemoryTree;
///
/// let mut tree = MemoryTree::new(|a: &i32, b: &i32| a.cmp(b) as i32);
/// tree.insert(5)?;
/// tree.insert(3)?;
/// tree.insert(8)?;
/// assert!(tree.insert(3).unwrap_err().is_duplicate_key());
///
/// let values: Vec<i32> = tree.traverse().copied().collect();
/// assert_eq!(values, vec![3, 5, 8]);
/// # Ok::<(), treefile::Error>(())
/// ```
pub struct MemoryTree<T, K>
where
    K: Comparator<T>,
{
    /// Arena of nodes; the root, if any, is index 0.
    nodes: Vec<MemoryNode<T>>,
    comparator: K,
}

impl<T, K> MemoryTree<T, K>
where
    K: Comparator<T>,
{
    pub fn new(comparator: K) -> Self {
        Self {
            nodes: Vec::new(),
            comparator,
        }
    }

    /// Insert `value`.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if a value comparing equal is already stored
    /// - `Error::ContractViolation` if the comparator leaves {-1, 0, 1}
    pub fn insert(&mut self, value: T) -> Result<()> {
        if self.nodes.is_empty() {
            self.nodes.push(MemoryNode {
                value,
                left: None,
                right: None,
            });
            return Ok(());
        }

        let mut parent = 0;
        let side = loop {
            let side = match three_way(&self.comparator, &value, &self.nodes[parent].value)? {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Err(Error::DuplicateKey),
            };

            match self.nodes[parent].child(side) {
                Some(child) => parent = child,
                None => break side,
            }
        };

        let index = self.nodes.len();
        self.nodes.push(MemoryNode {
            value,
            left: None,
            right: None,
        });
        self.nodes[parent].set_child(side, index);
        Ok(())
    }

    /// Walk the stored values in ascending key order.
    pub fn traverse(&self) -> MemoryTraverse<'_, T> {
        MemoryTraverse {
            nodes: &self.nodes,
            stack: Vec::new(),
            pending: if self.nodes.is_empty() { None } else { Some(0) },
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// In-order iterator over a [`MemoryTree`].
pub struct MemoryTraverse<'a, T> {
    nodes: &'a [MemoryNode<T>],
    stack: Vec<usize>,
    pending: Option<usize>,
}

impl<'a, T> Iterator for MemoryTraverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(index) = self.pending {
            self.stack.push(index);
            self.pending = self.nodes[index].left;
        }

        let index = self.stack.pop()?;
        let node = &self.nodes[index];
        self.pending = node.right;
        Some(&node.value)
    }
}
