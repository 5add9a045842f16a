//! Error types for the archive inspector.
//!
//! Classification misses are values, not errors: unrecognized input maps to
//! [`FormatTag::Unknown`](crate::types::FormatTag::Unknown) and a cascade miss
//! to [`ExecutableClass::Unrecognized`](crate::types::ExecutableClass::Unrecognized).
//! The variants below cover only genuine environmental failures.

use thiserror::Error;

/// Primary error type for the archive inspector.
#[derive(Debug, Error)]
pub enum InspectError {
    /// IO error while reading a file or seeking a stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for inspector operations.
pub type Result<T> = std::result::Result<T, InspectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err = InspectError::from(io);
        assert!(err.to_string().contains("short read"));
    }
}
