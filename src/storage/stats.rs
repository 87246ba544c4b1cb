//! Node store I/O statistics.

use std::fmt;

/// Block-level I/O counters kept by a [`NodeStore`](super::NodeStore).
///
/// Every node block read or written goes through the store, so these counts
/// describe exactly what an operation did to the file. A successful
/// non-root insertion appends one block and rewrites one.
///
/// # Example
/// ```
/// use treefile::IoStats;
///
/// let stats = IoStats::default();
/// assert_eq!(stats.blocks_written(), 0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IoStats {
    /// Node blocks read.
    pub blocks_read: u64,

    /// Node blocks written at the end of the file.
    pub blocks_appended: u64,

    /// Node blocks rewritten in place.
    pub blocks_rewritten: u64,
}

impl IoStats {
    /// All writes, appends included.
    #[inline]
    pub fn blocks_written(&self) -> u64 {
        self.blocks_appended + self.blocks_rewritten
    }

    /// Counters accumulated since `earlier` was taken.
    pub fn since(&self, earlier: &IoStats) -> IoStats {
        IoStats {
            blocks_read: self.blocks_read - earlier.blocks_read,
            blocks_appended: self.blocks_appended - earlier.blocks_appended,
            blocks_rewritten: self.blocks_rewritten - earlier.blocks_rewritten,
        }
    }
}

impl fmt::Display for IoStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IoStats {{ read: {}, appended: {}, rewritten: {} }}",
            self.blocks_read, self.blocks_appended, self.blocks_rewritten
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_written() {
        let stats = IoStats {
            blocks_read: 4,
            blocks_appended: 2,
            blocks_rewritten: 1,
        };
        assert_eq!(stats.blocks_written(), 3);
    }

    #[test]
    fn test_since() {
        let before = IoStats {
            blocks_read: 1,
            blocks_appended: 1,
            blocks_rewritten: 0,
        };
        let after = IoStats {
            blocks_read: 3,
            blocks_appended: 2,
            blocks_rewritten: 1,
        };

        let delta = after.since(&before);
        assert_eq!(delta.blocks_read, 2);
        assert_eq!(delta.blocks_appended, 1);
        assert_eq!(delta.blocks_rewritten, 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", IoStats::default()),
            "IoStats { read: 0, appended: 0, rewritten: 0 }"
        );
    }
}
