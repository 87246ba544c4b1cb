//! Record codecs and key comparators.
//!
//! The tree is generic over the record it stores. Two capabilities are
//! injected at construction:
//! - [`RecordCodec`] - turns one record into a fixed-size byte block and back
//! - [`Comparator`] - three-way key order over records
//!
//! Neither the node store nor the tree look inside a record.

mod person;

use std::cmp::Ordering;

use crate::common::{Error, Result};

pub use person::{compare_by_id, Person, PersonCodec, NAME_CAPACITY};

/// Fixed-size binary codec for one logical record type.
///
/// # Contract
/// - `block_size()` never changes for the life of the codec.
/// - `encode()` returns exactly `block_size()` bytes. The node store checks
///   this and fails with [`Error::ContractViolation`] before writing anything.
/// - `decode()` inverts `encode()` for any block `encode()` produced.
/// - Fields too large for the block are truncated by the codec, the same way
///   every time.
pub trait RecordCodec {
    /// The record type this codec handles.
    type Record;

    /// Size in bytes of one encoded record.
    fn block_size(&self) -> usize;

    /// Encode a record into exactly `block_size()` bytes.
    fn encode(&self, record: &Self::Record) -> Vec<u8>;

    /// Decode a record from a `block_size()` byte slice.
    fn decode(&self, block: &[u8]) -> Self::Record;
}

/// Three-way comparison over records.
///
/// `compare(a, b)` must return exactly `-1` (a precedes b), `0` (same key) or
/// `1` (a follows b). Any other value is rejected with
/// [`Error::ContractViolation`]; magnitudes are not accepted.
///
/// Any `Fn(&T, &T) -> i32` is a comparator:
/// ```
/// use treefile::codec::Comparator;
///
/// let by_value = |a: &u32, b: &u32| a.cmp(b) as i32;
/// assert_eq!(by_value.compare(&1, &2), -1);
/// ```
pub trait Comparator<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> i32;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> i32,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> i32 {
        self(lhs, rhs)
    }
}

/// Run a comparator and check its answer is one of `-1`, `0`, `1`.
pub(crate) fn three_way<T, K>(comparator: &K, lhs: &T, rhs: &T) -> Result<Ordering>
where
    K: Comparator<T> + ?Sized,
{
    match comparator.compare(lhs, rhs) {
        -1 => Ok(Ordering::Less),
        0 => Ok(Ordering::Equal),
        1 => Ok(Ordering::Greater),
        other => Err(Error::ContractViolation(format!(
            "comparator returned {other}, expected -1, 0 or 1"
        ))),
    }
}
