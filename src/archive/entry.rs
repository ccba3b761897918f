use crate::archive::format::{EntryKind, Header, HEADER_SIZE, NAME_SIZE, PADDING_SIZE, PAGE_SIZE};
use crate::error::{PsuError, Result};
use chrono::{Datelike, Local};
use std::fmt;
use std::io::{Read, Write};

/// Fixed-size portion of every entry: header + padding block + name field
pub const ENTRY_FIXED_SIZE: usize = HEADER_SIZE + PADDING_SIZE + NAME_SIZE;

/// One file or directory record within an archive
///
/// Structure (fixed portion, 512 bytes):
/// - Header: 32 bytes
/// - Padding: 32 bytes (opaque, round-trips verbatim, not assumed zero)
/// - Name: 448 bytes (NUL-padded UTF-8, right-trimmed of NUL on read)
///
/// A file entry is followed by `header.size` content bytes zero-padded to the
/// next 1024-byte page boundary. A directory entry carries no payload.
#[derive(Debug, Clone)]
pub enum Entry {
    Directory {
        name: String,
        header: Header,
        padding: [u8; PADDING_SIZE],
    },
    File {
        name: String,
        header: Header,
        padding: [u8; PADDING_SIZE],
        content: Vec<u8>,
    },
}

impl Entry {
    /// Create a new directory entry stamped with the current time
    pub fn directory(name: impl Into<String>) -> Self {
        Self::Directory {
            name: name.into(),
            header: Header::new(EntryKind::Directory, 0),
            padding: [0u8; PADDING_SIZE],
        }
    }

    /// Create a new file entry stamped with the current time
    pub fn file(name: impl Into<String>, content: Vec<u8>) -> Self {
        let header = Header::new(EntryKind::File, content.len() as u32);
        Self::File {
            name: name.into(),
            header,
            padding: [0u8; PADDING_SIZE],
            content,
        }
    }

    /// Entry name
    pub fn name(&self) -> &str {
        match self {
            Self::Directory { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// Entry header
    pub fn header(&self) -> &Header {
        match self {
            Self::Directory { header, .. } | Self::File { header, .. } => header,
        }
    }

    /// Mutable entry header
    pub fn header_mut(&mut self) -> &mut Header {
        match self {
            Self::Directory { header, .. } | Self::File { header, .. } => header,
        }
    }

    /// Opaque padding block
    pub fn padding(&self) -> &[u8; PADDING_SIZE] {
        match self {
            Self::Directory { padding, .. } | Self::File { padding, .. } => padding,
        }
    }

    /// File content, if this entry is a file
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            Self::Directory { .. } => None,
            Self::File { content, .. } => Some(content),
        }
    }

    /// Entry kind
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Directory { .. } => EntryKind::Directory,
            Self::File { .. } => EntryKind::File,
        }
    }

    /// Is this entry a file?
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Is this entry a directory?
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Read the next entry from a reader
    ///
    /// Returns the entry together with the number of bytes consumed, so the
    /// caller can locate the entry that follows.
    pub fn read_from<R: Read>(mut reader: R) -> Result<(Self, usize)> {
        let header = Header::read_from(&mut reader)?;

        let mut padding = [0u8; PADDING_SIZE];
        reader.read_exact(&mut padding)?;

        let mut name_buf = [0u8; NAME_SIZE];
        reader.read_exact(&mut name_buf)?;
        let name = decode_name(&name_buf)?;

        match header.kind() {
            Some(EntryKind::Directory) => Ok((
                Self::Directory {
                    name,
                    header,
                    padding,
                },
                ENTRY_FIXED_SIZE,
            )),
            Some(EntryKind::File) => {
                let size = header.size as usize;
                let mut content = vec![0u8; size];
                reader.read_exact(&mut content)?;

                // Skip the page-alignment pad trailing the content
                let pad = content_padding(size);
                let mut skipped = vec![0u8; pad];
                reader.read_exact(&mut skipped)?;

                Ok((
                    Self::File {
                        name,
                        header,
                        padding,
                        content,
                    },
                    ENTRY_FIXED_SIZE + size + pad,
                ))
            }
            None => Err(PsuError::UnknownEntryType {
                value: header.entry_type,
                name,
            }),
        }
    }

    /// Write the entry to a writer, returning the number of bytes written
    ///
    /// For file entries the header size field is emitted as the current
    /// content length, even if the stored header has gone stale.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let name_bytes = self.name().as_bytes();
        if name_bytes.len() > NAME_SIZE {
            return Err(PsuError::NameTooLong {
                length: name_bytes.len(),
            });
        }

        match self {
            Self::Directory { header, .. } => header.write_to(&mut writer)?,
            Self::File {
                header, content, ..
            } => {
                let mut header = header.clone();
                header.size = content.len() as u32;
                header.write_to(&mut writer)?;
            }
        }

        writer.write_all(self.padding())?;

        let mut name_buf = [0u8; NAME_SIZE];
        name_buf[..name_bytes.len()].copy_from_slice(name_bytes);
        writer.write_all(&name_buf)?;

        let mut written = ENTRY_FIXED_SIZE;
        if let Self::File { content, .. } = self {
            writer.write_all(content)?;
            let pad = content_padding(content.len());
            writer.write_all(&vec![0u8; pad])?;
            written += content.len() + pad;
        }

        Ok(written)
    }

    /// One `ls -l`-style listing line for this entry
    pub fn listing(&self) -> String {
        self.listing_for_year(Local::now().year())
    }

    fn listing_for_year(&self, current_year: i32) -> String {
        let modified = self.header().modified;
        let date = if modified.year() == current_year {
            modified.format("%b %d %H:%M").to_string()
        } else {
            modified.format("%b %d %Y").to_string()
        };

        match self {
            Self::Directory { name, .. } => format!("d {:<12} {:<6} {}", date, 0, name),
            Self::File { name, content, .. } => {
                format!("- {:<12} {:<6} {:<16}", date, content.len(), name)
            }
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.listing())
    }
}

/// Number of zero bytes trailing file content up to the next page boundary
///
/// Content that already ends exactly on a boundary gets no padding rather
/// than a full empty page.
pub fn content_padding(content_size: usize) -> usize {
    (PAGE_SIZE - content_size % PAGE_SIZE) % PAGE_SIZE
}

fn decode_name(buf: &[u8]) -> Result<String> {
    let name = std::str::from_utf8(buf)
        .map_err(|e| PsuError::InvalidName(format!("invalid UTF-8 in name field: {}", e)))?;
    Ok(name.trim_end_matches('\0').to_string())
}
