use std::io;
use thiserror::Error;

/// Result type for PSU operations
pub type Result<T> = std::result::Result<T, PsuError>;

/// Unified error type for all PSU operations
#[derive(Debug, Error)]
pub enum PsuError {
    // Codec errors
    #[error("malformed entry header: fewer than 32 bytes available")]
    MalformedHeader,

    #[error("invalid timestamp in entry header")]
    InvalidTimestamp,

    #[error("unknown type value {value:#06x} found for entry \"{name}\"")]
    UnknownEntryType { value: u16, name: String },

    #[error("entry name too long: {length} bytes (max 448)")]
    NameTooLong { length: usize },

    #[error("invalid entry name: {0}")]
    InvalidName(String),

    // Archive errors
    #[error("entry \"{0}\" not found")]
    EntryNotFound(String),

    #[error("entry \"{0}\" is not a file")]
    EntryNotAFile(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
