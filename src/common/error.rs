//! Error types for treefile.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in treefile.
///
/// Three families:
/// - [`Error::DuplicateKey`] is recoverable: nothing was written.
/// - [`Error::Io`] and [`Error::FileLocked`] are storage failures, fatal to
///   the operation that hit them.
/// - [`Error::ContractViolation`] means a codec or comparator broke its
///   contract. This is a bug in the caller, not a runtime condition.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from opening, seeking, reading or writing the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Another handle holds the exclusive lock on the backing file.
    #[error("file {} is locked by another handle", .path.display())]
    FileLocked { path: PathBuf },

    /// A key comparing equal to the inserted one is already in the tree.
    #[error("duplicate key")]
    DuplicateKey,

    /// A codec or comparator returned something outside its contract.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl Error {
    /// Check whether this is a [`Error::DuplicateKey`].
    #[inline]
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Error::DuplicateKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", Error::DuplicateKey), "duplicate key");

        let err = Error::ContractViolation("codec wrote 3 bytes".into());
        assert_eq!(format!("{}", err), "contract violation: codec wrote 3 bytes");

        let err = Error::FileLocked {
            path: PathBuf::from("tree.db"),
        };
        assert_eq!(format!("{}", err), "file tree.db is locked by another handle");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_is_duplicate_key() {
        assert!(Error::DuplicateKey.is_duplicate_key());
        assert!(!Error::ContractViolation(String::new()).is_duplicate_key());
    }
}
