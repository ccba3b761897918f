use crate::error::{PsuError, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use std::io::{Read, Write};

/// Header size in bytes
pub const HEADER_SIZE: usize = 32;

/// Padding block size within each entry, in bytes
pub const PADDING_SIZE: usize = 32;

/// Name field size within each entry, in bytes (NUL-padded UTF-8)
pub const NAME_SIZE: usize = 448;

/// File content is zero-padded on the wire to the next page boundary
pub const PAGE_SIZE: usize = 1024;

/// Entry type tags carried in the header type field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum EntryKind {
    Directory = 0x8427,
    File = 0x8497,
}

impl EntryKind {
    /// Map a raw type field value to a known entry kind
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x8427 => Some(Self::Directory),
            0x8497 => Some(Self::File),
            _ => None,
        }
    }
}

/// Entry header
///
/// Precedes every entry in the archive. The `size` field is the content byte
/// length for files and the entry count for directories.
///
/// Structure (32 bytes fixed, little-endian):
/// - Type: uint16 (2 bytes)
/// - Unk1: uint16 (2 bytes)
/// - Size: uint32 (4 bytes)
/// - Created Timestamp: 8 bytes (zero lead byte, then sec/min/hour/day/month
///   as uint8 and year as uint16)
/// - Sector Address: uint16 (2 bytes)
/// - Unk2: uint16 (2 bytes)
/// - Unk3: uint32 (4 bytes)
/// - Modified Timestamp: 8 bytes
///
/// `unk1`/`unk2`/`unk3` and `sector` are opaque and round-trip verbatim. The
/// lead byte of each timestamp is always written back as zero. No validation
/// of the type field happens here; the entry codec dispatches on it.
#[derive(Debug, Clone)]
pub struct Header {
    pub entry_type: u16,
    pub size: u32,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub sector: u16,
    pub unk1: u16,
    pub unk2: u16,
    pub unk3: u32,
}

impl Header {
    /// Create a new header stamped with the current local time
    pub fn new(kind: EntryKind, size: u32) -> Self {
        let now = Local::now().naive_local();
        Self {
            entry_type: kind as u16,
            size,
            created: now,
            modified: now,
            sector: 0,
            unk1: 0,
            unk2: 0,
            unk3: 0,
        }
    }

    /// Get the entry kind, if the type field holds a known tag
    pub fn kind(&self) -> Option<EntryKind> {
        EntryKind::from_u16(self.entry_type)
    }

    /// Is this a file header?
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryKind::File as u16
    }

    /// Is this a directory header?
    pub fn is_directory(&self) -> bool {
        self.entry_type == EntryKind::Directory as u16
    }

    /// Write header to a writer
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.entry_type.to_le_bytes())?;
        writer.write_all(&self.unk1.to_le_bytes())?;
        writer.write_all(&self.size.to_le_bytes())?;
        writer.write_all(&encode_timestamp(&self.created))?;
        writer.write_all(&self.sector.to_le_bytes())?;
        writer.write_all(&self.unk2.to_le_bytes())?;
        writer.write_all(&self.unk3.to_le_bytes())?;
        writer.write_all(&encode_timestamp(&self.modified))?;
        Ok(())
    }

    /// Read header from a reader
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = [0u8; HEADER_SIZE];
        reader
            .read_exact(&mut buf)
            .map_err(|_| PsuError::MalformedHeader)?;

        let entry_type = u16::from_le_bytes([buf[0], buf[1]]);
        let unk1 = u16::from_le_bytes([buf[2], buf[3]]);
        let size = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let created = decode_timestamp(&buf[8..16])?;
        let sector = u16::from_le_bytes([buf[16], buf[17]]);
        let unk2 = u16::from_le_bytes([buf[18], buf[19]]);
        let unk3 = u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]);
        let modified = decode_timestamp(&buf[24..32])?;

        Ok(Self {
            entry_type,
            size,
            created,
            modified,
            sector,
            unk1,
            unk2,
            unk3,
        })
    }
}

/// Decode the 8-byte timestamp sub-record. The lead byte is ignored.
fn decode_timestamp(bytes: &[u8]) -> Result<NaiveDateTime> {
    let year = u16::from_le_bytes([bytes[6], bytes[7]]);
    NaiveDate::from_ymd_opt(year as i32, bytes[5] as u32, bytes[4] as u32)
        .and_then(|date| date.and_hms_opt(bytes[3] as u32, bytes[2] as u32, bytes[1] as u32))
        .ok_or(PsuError::InvalidTimestamp)
}

/// Encode the 8-byte timestamp sub-record. The lead byte is always zero.
fn encode_timestamp(timestamp: &NaiveDateTime) -> [u8; 8] {
    let year = (timestamp.year() as u16).to_le_bytes();
    [
        0,
        timestamp.second() as u8,
        timestamp.minute() as u8,
        timestamp.hour() as u8,
        timestamp.day() as u8,
        timestamp.month() as u8,
        year[0],
        year[1],
    ]
}
