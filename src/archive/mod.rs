mod entry;
mod format;
mod psu;

pub use entry::{content_padding, Entry, ENTRY_FIXED_SIZE};
pub use format::{EntryKind, Header, HEADER_SIZE, NAME_SIZE, PADDING_SIZE, PAGE_SIZE};
pub use psu::Psu;
