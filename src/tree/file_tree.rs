//! File-backed binary search tree.
//!
//! The [`FileTree`] keeps every node in a [`NodeStore`] block and follows
//! links by reading blocks:
//! - Insertion descends from the root block and appends one block
//! - Traversal walks the blocks in key order with an explicit stack

use std::cmp::Ordering;
use std::path::Path;

use tracing::debug;

use crate::codec::{three_way, Comparator, RecordCodec};
use crate::common::{Error, Link, Result, StoreConfig};
use crate::storage::{IoStats, Node, NodeStore, Side};

/// An unbalanced binary search tree stored in a single file.
///
/// # Structure
/// ```text
///            offset 0
///          ┌─────────┐
///          │ root  5 │
///          └─────────┘
///         left/      \right
///   ┌─────────┐   ┌─────────┐
///   │ 3 @ S   │   │ 8 @ 2S  │
///   └─────────┘   └─────────┘
///   left/
/// ┌─────────┐
/// │ 1 @ 3S  │
/// └─────────┘
/// ```
///
/// Nodes are identified by their byte offset (`S` is the node block size).
/// The root is always the block at offset 0; each later block is appended by
/// the insertion that created it. Insertion order decides the shape: keys
/// inserted in sorted order produce a list.
///
/// # Ownership
/// The tree owns its [`NodeStore`], which holds an exclusive lock on the
/// file. The lock is released when the tree is dropped or [`closed`].
///
/// # Usage
/// ```no_run
/// use treefile::codec::{compare_by_id, Person, PersonCodec};
/// use treefile::FileTree;
///
/// let mut tree = FileTree::open("persons.db", PersonCodec, compare_by_id)?;
/// tree.insert(Person::new(5, "Ada", 36))?;
/// tree.insert(Person::new(3, "Alan", 41))?;
///
/// for person in tree.traverse() {
///     println!("{}", person?);
/// }
/// tree.close()?;
/// # Ok::<(), treefile::Error>(())
/// ```
///
/// [`closed`]: FileTree::close
pub struct FileTree<C, K>
where
    C: RecordCodec,
    K: Comparator<C::Record>,
{
    store: NodeStore<C>,
    comparator: K,
}

impl<C, K> FileTree<C, K>
where
    C: RecordCodec,
    K: Comparator<C::Record>,
{
    /// Open the tree stored at `path`, creating an empty file if needed.
    ///
    /// Every write is synced to disk. Use [`open_with_config`] to change that.
    ///
    /// # Errors
    /// - `Error::FileLocked` if another handle has the file open
    /// - `Error::Io` if the file cannot be opened or created
    ///
    /// [`open_with_config`]: FileTree::open_with_config
    pub fn open<P: AsRef<Path>>(path: P, codec: C, comparator: K) -> Result<Self> {
        Self::open_with_config(path, codec, comparator, StoreConfig::default())
    }

    /// Open the tree stored at `path` with explicit store options.
    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        codec: C,
        comparator: K,
        config: StoreConfig,
    ) -> Result<Self> {
        let store = NodeStore::open_or_create(path, codec, config)?;
        Ok(Self::from_store(store, comparator))
    }

    /// Build a tree over an already opened store.
    pub fn from_store(store: NodeStore<C>, comparator: K) -> Self {
        Self { store, comparator }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Insert `value`.
    ///
    /// On success exactly one block is appended to the file. Unless the tree
    /// was empty, exactly one existing block is rewritten: the new node's
    /// parent, with its child link pointing at the new block.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if a value comparing equal is already stored.
    ///   The file is left untouched.
    /// - `Error::ContractViolation` if the comparator returns something other
    ///   than -1, 0 or 1, or the codec output has the wrong length.
    /// - `Error::Io` on any read or write failure.
    pub fn insert(&mut self, value: C::Record) -> Result<()> {
        let Some(mut parent) = self.store.read_root()? else {
            self.store
                .write_node_at(&Node::new(Link::ROOT, value, Link::NULL))?;
            debug!("inserted root node");
            return Ok(());
        };

        let side = loop {
            let side = match three_way(&self.comparator, &value, &parent.value)? {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    debug!(existing = %parent.address, "rejected duplicate key");
                    return Err(Error::DuplicateKey);
                }
            };

            match self.store.read_node_at(parent.child(side))? {
                Some(child) => parent = child,
                None => break side,
            }
        };

        // New block first, parent link second: a failure in between leaves an
        // unreachable block, never a dangling link.
        let node = self.store.append_node(value, parent.address)?;
        parent.set_child(side, node.address);
        self.store.write_node_at(&parent)?;

        debug!(address = %node.address, parent = %parent.address, ?side, "inserted node");
        Ok(())
    }

    /// Walk the stored values in ascending key order.
    ///
    /// The walk is lazy: each call to `next()` reads only the blocks needed to
    /// reach the next value, so stopping early leaves the rest of the file
    /// unread. An iterator cannot be restarted; calling `traverse()` again
    /// starts a fresh walk from the root.
    pub fn traverse(&mut self) -> Traverse<'_, C> {
        Traverse::new(&mut self.store)
    }

    /// Check whether the tree has no nodes.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.file_len()? == 0)
    }

    /// Number of nodes stored.
    pub fn node_count(&self) -> Result<u64> {
        self.store.node_count()
    }

    /// Length of the backing file in bytes.
    pub fn file_len(&self) -> Result<u64> {
        self.store.file_len()
    }

    /// Block I/O counters since the tree was opened.
    pub fn stats(&self) -> IoStats {
        self.store.stats()
    }

    /// The node store backing this tree.
    pub fn store(&self) -> &NodeStore<C> {
        &self.store
    }

    /// Flush, unlock and close the backing file.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

/// In-order iterator over a [`FileTree`]'s values.
///
/// Holds the nodes whose left subtree is being walked and the link of the
/// next subtree to descend into. Yields `Err` at most once: after an error the
/// iterator is finished.
pub struct Traverse<'a, C: RecordCodec> {
    store: &'a mut NodeStore<C>,
    /// Visited nodes not yet yielded.
    stack: Vec<Node<C::Record>>,
    /// Root of the next subtree to descend into.
    pending: Link,
    started: bool,
    finished: bool,
}

impl<'a, C: RecordCodec> Traverse<'a, C> {
    fn new(store: &'a mut NodeStore<C>) -> Self {
        Self {
            store,
            stack: Vec::new(),
            pending: Link::NULL,
            started: false,
            finished: false,
        }
    }

    fn advance(&mut self) -> Result<Option<C::Record>> {
        if !self.started {
            self.started = true;
            if self.store.file_len()? > 0 {
                self.pending = Link::ROOT;
            }
        }

        while let Some(node) = self.store.read_node_at(self.pending)? {
            self.pending = node.left;
            self.stack.push(node);
        }

        let Some(node) = self.stack.pop() else {
            return Ok(None);
        };
        self.pending = node.right;
        Ok(Some(node.value))
    }
}

impl<C: RecordCodec> Iterator for Traverse<'_, C> {
    type Item = Result<C::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.advance() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<C: RecordCodec> std::iter::FusedIterator for Traverse<'_, C> {}
