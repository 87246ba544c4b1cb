//! Link type: a node's identity inside the backing file.

use std::fmt;

use crate::common::config::NULL_LINK;

/// Byte offset of a node block in the backing file.
///
/// Links play the role pointers play in an in-memory tree. The file is the
/// arena and a link is an index into it; blocks are never removed, so a
/// non-null link written by the tree always resolves.
///
/// Stored on disk as a little-endian `i64` with `-1` meaning "no node".
///
/// # Example
/// ```
/// use treefile::Link;
///
/// let link = Link::new(52);
/// assert!(!link.is_null());
/// assert_eq!(link.offset(), Some(52));
/// assert_eq!(Link::NULL.offset(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link(pub i64);

impl Link {
    /// Sentinel link: "no node".
    pub const NULL: Link = Link(NULL_LINK);

    /// The root block always lives at offset 0.
    pub const ROOT: Link = Link(0);

    /// Create a link to the block starting at `offset`.
    #[inline]
    pub fn new(offset: u64) -> Self {
        Link(offset as i64)
    }

    /// Check if this is the null sentinel.
    #[inline]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Byte offset of the block, or `None` for the null link.
    #[inline]
    pub fn offset(&self) -> Option<u64> {
        if self.is_null() {
            None
        } else {
            Some(self.0 as u64)
        }
    }

    /// Encode as 8 little-endian bytes.
    #[inline]
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Decode from 8 little-endian bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Link(i64::from_le_bytes(bytes))
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Link(NULL)")
        } else {
            write!(f, "Link({})", self.0)
        }
    }
}
