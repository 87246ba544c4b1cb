//! `Person` record and its fixed-size codec.

use std::fmt;

use super::RecordCodec;

/// Maximum encoded length of [`Person::name`] in bytes.
pub const NAME_CAPACITY: usize = 20;

/// A person keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

impl Person {
    pub fn new(id: i32, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person {{ id: {}, name: {}, age: {} }}", self.id, self.name, self.age)
    }
}

/// Orders people by `id`.
pub fn compare_by_id(lhs: &Person, rhs: &Person) -> i32 {
    lhs.id.cmp(&rhs.id) as i32
}

/// Codec for [`Person`].
///
/// # Layout (29 bytes)
/// ```text
/// Offset  Size  Field
/// ------  ----  -----
/// 0       4     id (i32, little-endian)
/// 4       1     name length in bytes (0..=20)
/// 5       20    name (UTF-8, zero padded)
/// 25      4     age (i32, little-endian)
/// ```
///
/// Names longer than 20 bytes are cut at the last char boundary that fits,
/// so the stored prefix is always valid UTF-8. The length byte keeps every
/// byte of a stored name, zero bytes included.
///
/// # Example
/// ```
/// use treefile::codec::{Person, PersonCodec, RecordCodec};
///
/// let codec = PersonCodec;
/// let block = codec.encode(&Person::new(7, "Ada", 36));
/// assert_eq!(block.len(), codec.block_size());
/// assert_eq!(codec.decode(&block), Person::new(7, "Ada", 36));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonCodec;

impl PersonCodec {
    pub const BLOCK_SIZE: usize = 4 + 1 + NAME_CAPACITY + 4;

    const OFFSET_ID: usize = 0;
    const OFFSET_NAME_LEN: usize = 4;
    const OFFSET_NAME: usize = 5;
    const OFFSET_AGE: usize = Self::OFFSET_NAME + NAME_CAPACITY;
}

/// Longest prefix of `s` that fits in `capacity` bytes without splitting a char.
fn truncate_to_boundary(s: &str, capacity: usize) -> &str {
    if s.len() <= capacity {
        return s;
    }
    let mut end = capacity;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl RecordCodec for PersonCodec {
    type Record = Person;

    fn block_size(&self) -> usize {
        Self::BLOCK_SIZE
    }

    fn encode(&self, record: &Person) -> Vec<u8> {
        let mut block = vec![0u8; Self::BLOCK_SIZE];

        block[Self::OFFSET_ID..Self::OFFSET_ID + 4].copy_from_slice(&record.id.to_le_bytes());

        let name = truncate_to_boundary(&record.name, NAME_CAPACITY).as_bytes();
        block[Self::OFFSET_NAME_LEN] = name.len() as u8;
        block[Self::OFFSET_NAME..Self::OFFSET_NAME + name.len()].copy_from_slice(name);

        block[Self::OFFSET_AGE..Self::OFFSET_AGE + 4].copy_from_slice(&record.age.to_le_bytes());

        block
    }

    fn decode(&self, block: &[u8]) -> Person {
        let id = i32::from_le_bytes([
            block[Self::OFFSET_ID],
            block[Self::OFFSET_ID + 1],
            block[Self::OFFSET_ID + 2],
            block[Self::OFFSET_ID + 3],
        ]);

        let name_len = usize::from(block[Self::OFFSET_NAME_LEN]).min(NAME_CAPACITY);
        let name_field = &block[Self::OFFSET_NAME..Self::OFFSET_NAME + name_len];
        let name = String::from_utf8_lossy(name_field).into_owned();

        let age = i32::from_le_bytes([
            block[Self::OFFSET_AGE],
            block[Self::OFFSET_AGE + 1],
            block[Self::OFFSET_AGE + 2],
            block[Self::OFFSET_AGE + 3],
        ]);

        Person { id, name, age }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(PersonCodec.block_size(), 29);
        assert_eq!(PersonCodec.encode(&Person::new(1, "", 0)).len(), 29);
    }

    #[test]
    fn test_roundtrip() {
        let person = Person::new(-42, "Grace Hopper", 85);
        let block = PersonCodec.encode(&person);
        assert_eq!(PersonCodec.decode(&block), person);
    }

    #[test]
    fn test_byte_layout() {
        let block = PersonCodec.encode(&Person::new(0x04030201, "AB", 0x08070605));

        assert_eq!(&block[0..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(block[4], 2); // name length
        assert_eq!(&block[5..7], b"AB");
        assert!(block[7..25].iter().all(|&b| b == 0));
        assert_eq!(&block[25..29], &[0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn test_trailing_nul_in_name_roundtrips() {
        for name in ["ab\0", "\0", "x\0\0y\0", "nineteen chars\0\0\0\0\0"] {
            let person = Person::new(1, name, 2);
            let decoded = PersonCodec.decode(&PersonCodec.encode(&person));
            assert_eq!(decoded, person, "name {:?}", name);
        }
    }

    #[test]
    fn test_empty_name_roundtrips() {
        let person = Person::new(9, "", 0);
        assert_eq!(PersonCodec.decode(&PersonCodec.encode(&person)), person);
    }

    #[test]
    fn test_long_name_truncated() {
        let person = Person::new(1, "Maximilian Alexander Schmidt", 30);
        let decoded = PersonCodec.decode(&PersonCodec.encode(&person));

        assert_eq!(decoded.name, "Maximilian Alexander");
        assert_eq!(decoded.name.len(), NAME_CAPACITY);
        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.age, 30);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 19 ASCII bytes then a 2-byte char: only 19 bytes fit.
        let name = format!("{}é", "a".repeat(19));
        let decoded = PersonCodec.decode(&PersonCodec.encode(&Person::new(1, name, 1)));
        assert_eq!(decoded.name, "a".repeat(19));

        // Same input, same output.
        let again = PersonCodec.encode(&Person::new(1, format!("{}é", "a".repeat(19)), 1));
        assert_eq!(PersonCodec.encode(&Person::new(1, decoded.name, 1)), again);
    }

    #[test]
    fn test_compare_by_id() {
        let a = Person::new(1, "a", 10);
        let b = Person::new(2, "b", 5);
        assert_eq!(compare_by_id(&a, &b), -1);
        assert_eq!(compare_by_id(&b, &a), 1);
        assert_eq!(compare_by_id(&a, &Person::new(1, "other", 99)), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Person::new(3, "Linus", 54)),
            "Person { id: 3, name: Linus, age: 54 }"
        );
    }
}
