//! Node Store - block-level file I/O for tree nodes.
//!
//! The [`NodeStore`] handles all direct file operations:
//! - Reading a node block at a link
//! - Rewriting a node block in place
//! - Appending new node blocks
//! - Holding the exclusive lock on the backing file

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info, trace};

use crate::codec::RecordCodec;
use crate::common::config::NODE_OVERHEAD;
use crate::common::{Error, Link, Result, StoreConfig};
use crate::storage::node::{Node, NodeLinks};
use crate::storage::IoStats;

/// Reads and writes fixed-size node blocks in a single file.
///
/// # File Layout
/// Node blocks are appended back to back; a link is the byte offset of a
/// block's first byte:
/// ```text
/// ┌──────────┬──────────┬──────────┬─────────┬──────────┐
/// │ Node 0   │ Node 1   │ Node 2   │  ...    │ Node N   │
/// │ (root)   │          │          │         │          │
/// └──────────┴──────────┴──────────┴─────────┴──────────┘
/// Offset: 0   S          2×S        ...       N×S
/// ```
///
/// where `S = codec.block_size() + 24`. There is no header and no free list.
///
/// # Seek Discipline
/// Every operation seeks before it reads or writes. No operation relies on
/// the file position left behind by a previous one.
///
/// # Locking
/// The file is exclusively locked (`flock`/`LockFileEx`) from open until the
/// store is dropped. A second store on the same path fails with
/// [`Error::FileLocked`].
///
/// # Thread Safety
/// `NodeStore` is **single-threaded**. All methods take `&mut self`.
pub struct NodeStore<C: RecordCodec> {
    file: File,
    path: PathBuf,
    codec: C,
    config: StoreConfig,
    stats: IoStats,
}

impl<C: RecordCodec> NodeStore<C> {
    /// Create a new, empty node file.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P, codec: C, config: StoreConfig) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)?;

        Self::locked(file, path.as_ref(), codec, config)
    }

    /// Open an existing node file.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, cannot be opened, or is
    /// locked by another handle.
    pub fn open<P: AsRef<Path>>(path: P, codec: C, config: StoreConfig) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(&path)?;

        Self::locked(file, path.as_ref(), codec, config)
    }

    /// Open an existing node file, or create if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P, codec: C, config: StoreConfig) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path, codec, config)
        } else {
            Self::create(path, codec, config)
        }
    }

    fn locked(file: File, path: &Path, codec: C, config: StoreConfig) -> Result<Self> {
        if let Err(err) = file.try_lock_exclusive() {
            if err.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                return Err(Error::FileLocked {
                    path: path.to_path_buf(),
                });
            }
            return Err(err.into());
        }

        let store = Self {
            file,
            path: path.to_path_buf(),
            codec,
            config,
            stats: IoStats::default(),
        };

        let file_len = store.file_len()?;
        info!(
            path = %store.path.display(),
            node_size = store.node_size(),
            file_len,
            "opened node file"
        );
        Ok(store)
    }

    // ========================================================================
    // Node I/O
    // ========================================================================

    /// Read the node block at `link`.
    ///
    /// Returns `None` for the null link.
    ///
    /// # Errors
    /// Returns `Error::Io` if the seek or read fails, including a short read
    /// when `link` points at or past the end of the file.
    pub fn read_node_at(&mut self, link: Link) -> Result<Option<Node<C::Record>>> {
        let Some(offset) = link.offset() else {
            return Ok(None);
        };

        self.file.seek(SeekFrom::Start(offset))?;

        let mut block = vec![0u8; self.node_size()];
        self.file.read_exact(&mut block)?;
        self.stats.blocks_read += 1;
        trace!(%link, "read node block");

        let block_size = self.codec.block_size();
        let value = self.codec.decode(&block[..block_size]);
        let links = NodeLinks::from_bytes(&block[block_size..]);

        Ok(Some(Node {
            address: link,
            value,
            parent: links.parent,
            left: links.left,
            right: links.right,
        }))
    }

    /// Read the root node, or `None` if the file is empty.
    pub fn read_root(&mut self) -> Result<Option<Node<C::Record>>> {
        if self.file_len()? == 0 {
            return Ok(None);
        }
        self.read_node_at(Link::ROOT)
    }

    /// Write `node` at `node.address`.
    ///
    /// Used for the first write of a block at the end of the file and for
    /// rewriting an existing block's links in place.
    ///
    /// # Errors
    /// - `Error::ContractViolation` if the codec output has the wrong length
    ///   or the node's address is the null link. Nothing is written.
    /// - `Error::Io` if the seek or write fails.
    pub fn write_node_at(&mut self, node: &Node<C::Record>) -> Result<()> {
        let Some(offset) = node.address.offset() else {
            return Err(Error::ContractViolation(
                "cannot write a node at the null link".into(),
            ));
        };

        let block = self.encode_block(node)?;
        let appending = offset >= self.file_len()?;
        self.write_block(offset, &block, appending)
    }

    /// Append a new childless node holding `value` at the end of the file.
    ///
    /// Returns the node with its `address` set to the offset it was written at.
    pub fn append_node(&mut self, value: C::Record, parent: Link) -> Result<Node<C::Record>> {
        let offset = self.file.seek(SeekFrom::End(0))?;
        let node = Node::new(Link::new(offset), value, parent);

        let block = self.encode_block(&node)?;
        self.write_block(offset, &block, true)?;
        Ok(node)
    }

    fn encode_block(&self, node: &Node<C::Record>) -> Result<Vec<u8>> {
        let block_size = self.codec.block_size();
        let mut block = self.codec.encode(&node.value);
        if block.len() != block_size {
            return Err(Error::ContractViolation(format!(
                "codec produced {} bytes, block size is {}",
                block.len(),
                block_size
            )));
        }

        block.resize(block_size + NODE_OVERHEAD, 0);
        NodeLinks::from(node).write_to(&mut block[block_size..]);
        Ok(block)
    }

    fn write_block(&mut self, offset: u64, block: &[u8], appending: bool) -> Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(block)?;
        if self.config.sync_writes {
            self.file.sync_all()?; // fsync for durability
        }

        if appending {
            self.stats.blocks_appended += 1;
        } else {
            self.stats.blocks_rewritten += 1;
        }
        debug!(offset, appending, "wrote node block");
        Ok(())
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Flush all written blocks to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Flush, unlock and close the file.
    ///
    /// Dropping the store also releases the file and its lock; `close` exists
    /// to surface errors from the final flush.
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        FileExt::unlock(&self.file)?;
        info!(path = %self.path.display(), stats = %self.stats, "closed node file");
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current length of the backing file in bytes.
    pub fn file_len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Number of node blocks in the file, reachable or not.
    pub fn node_count(&self) -> Result<u64> {
        Ok(self.file_len()? / self.node_size() as u64)
    }

    /// Size of the codec's data block.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.codec.block_size()
    }

    /// Size of one full node block (data block plus links).
    #[inline]
    pub fn node_size(&self) -> usize {
        self.codec.block_size() + NODE_OVERHEAD
    }

    #[inline]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    #[inline]
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// I/O counters since the store was opened.
    #[inline]
    pub fn stats(&self) -> IoStats {
        self.stats
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
