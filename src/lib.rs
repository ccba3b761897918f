//! psu-rs: library for PS2 PSU game save archives
//!
//! A PSU archive bundles one save's filesystem tree (a root directory plus
//! files and the "." / ".." sentinels) into a single buffer of back-to-back
//! entries. This crate implements:
//! - The 32-byte entry header codec (little-endian, embedded calendar
//!   timestamps, opaque reserved fields preserved on round-trip)
//! - The entry codec (fixed 512-byte prefix, 1024-byte page-aligned file
//!   content)
//! - The in-memory archive model with whole-buffer parse/serialize and the
//!   directory-size recomputation pass
//!
//! # Example
//!
//! ```no_run
//! use psu_rs::Psu;
//!
//! // Build an archive and write it out
//! let mut psu = Psu::create("mygame");
//! psu.write("icon.sys", b"icon bytes".to_vec())?;
//! psu.save("mygame.psu")?;
//!
//! // Read it back
//! let psu = Psu::load("mygame.psu")?;
//! let icon = psu.read("icon.sys")?;
//! # Ok::<(), psu_rs::PsuError>(())
//! ```

// Core modules
pub mod archive;
pub mod error;

// Re-export commonly used types
pub use archive::{
    content_padding, Entry, EntryKind, Header, Psu, ENTRY_FIXED_SIZE, HEADER_SIZE, NAME_SIZE,
    PADDING_SIZE, PAGE_SIZE,
};
pub use error::{PsuError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Ensure core types are accessible
        let _kind = EntryKind::File;
        let _psu = Psu::new();
    }
}
