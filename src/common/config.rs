//! Configuration constants and runtime options for treefile.

/// Size of one encoded link in bytes (little-endian `i64`).
pub const LINK_SIZE: usize = 8;

/// Bytes every node block carries after the codec's data block.
///
/// # Layout
/// ```text
/// ┌──────────────┬──────────┬──────────┬──────────┐
/// │ data block   │ parent   │ left     │ right    │
/// │ (codec size) │ (8 B)    │ (8 B)    │ (8 B)    │
/// └──────────────┴──────────┴──────────┴──────────┘
/// ```
pub const NODE_OVERHEAD: usize = LINK_SIZE * 3;

/// Raw value of the "no node" link.
pub const NULL_LINK: i64 = -1;

/// File used by the command-line front end when no path is given.
pub const DEFAULT_TREE_PATH: &str = "persons.db";

/// Environment variable overriding [`DEFAULT_TREE_PATH`].
pub const TREE_PATH_ENV: &str = "TREEFILE_PATH";

/// Runtime options for a [`NodeStore`](crate::storage::NodeStore).
///
/// # Example
/// ```
/// use treefile::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert!(config.sync_writes);
///
/// let fast = StoreConfig { sync_writes: false };
/// assert!(!fast.sync_writes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Call `fsync()` after every block write.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { sync_writes: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_overhead() {
        assert_eq!(NODE_OVERHEAD, 24);
        assert_eq!(LINK_SIZE, std::mem::size_of::<i64>());
    }

    #[test]
    fn test_default_config_syncs() {
        assert!(StoreConfig::default().sync_writes);
    }
}
