use crate::archive::entry::Entry;
use crate::archive::format::{EntryKind, NAME_SIZE};
use crate::error::{PsuError, Result};
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// An in-memory PSU archive: one ordered sequence of entries
///
/// Order is semantically meaningful — it is the on-disk order, and lookups
/// return the first name match. Names are not required to be unique.
///
/// The archive is a pure in-memory value; `load` and `save` are the only
/// operations that touch the filesystem, and both move the whole buffer at
/// once.
#[derive(Debug, Clone, Default)]
pub struct Psu {
    entries: Vec<Entry>,
}

impl Psu {
    /// Create an empty archive
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an archive seeded with the conventional directory skeleton:
    /// one root directory named `base` plus the "." and ".." sentinels
    pub fn create(base: &str) -> Self {
        let mut psu = Self::new();
        psu.add(Entry::directory(base));
        psu.add(Entry::directory("."));
        psu.add(Entry::directory(".."));
        psu
    }

    /// Parse an archive from a byte buffer
    ///
    /// Decodes back-to-back entries from offset 0 until the buffer is
    /// exhausted. Any unknown-type failure aborts the whole parse.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut cursor = Cursor::new(data);

        let mut offset = 0;
        while offset < data.len() {
            let (entry, consumed) = Entry::read_from(&mut cursor)?;
            entries.push(entry);
            offset += consumed;
        }

        Ok(Self { entries })
    }

    /// Load an archive from a file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        let psu = Self::parse(&data)?;
        debug!(
            bytes = data.len(),
            entries = psu.entries.len(),
            "loaded archive"
        );
        Ok(psu)
    }

    /// Serialize the archive to its on-disk byte form
    ///
    /// Directory sizes are derived from the archive's current membership, so
    /// they are recomputed before encoding on every call: "." and ".." get
    /// size 0, every other directory gets the total entry count minus one.
    /// File sizes are re-synced to their content length at the same pass.
    pub fn serialize(&mut self) -> Result<Vec<u8>> {
        let total = self.entries.len();
        for entry in &mut self.entries {
            match entry {
                Entry::Directory { name, header, .. } => {
                    header.size = if name == "." || name == ".." {
                        0
                    } else {
                        (total - 1) as u32
                    };
                }
                Entry::File {
                    header, content, ..
                } => {
                    header.size = content.len() as u32;
                }
            }
        }

        let mut data = Vec::new();
        for entry in &self.entries {
            entry.write_to(&mut data)?;
        }
        Ok(data)
    }

    /// Serialize the archive and write it to a file on disk
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let data = self.serialize()?;
        fs::write(path.as_ref(), &data)?;
        debug!(
            bytes = data.len(),
            entries = self.entries.len(),
            "saved archive"
        );
        Ok(())
    }

    /// Append an entry to the archive
    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Write file content under the given name
    ///
    /// Replaces the content of the first matching entry in place, or appends
    /// a new file entry at the end when the name is absent. Fails with
    /// `EntryNotAFile` when the first match is a directory.
    pub fn write(&mut self, name: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        match self.index(name, None) {
            Ok(i) => match &mut self.entries[i] {
                Entry::File {
                    header, content, ..
                } => {
                    *content = data.into();
                    header.size = content.len() as u32;
                    Ok(())
                }
                Entry::Directory { .. } => Err(PsuError::EntryNotAFile(name.to_string())),
            },
            Err(PsuError::EntryNotFound(_)) => {
                if name.len() > NAME_SIZE {
                    return Err(PsuError::NameTooLong { length: name.len() });
                }
                self.add(Entry::file(name, data.into()));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Read the content of the file entry with the given name
    ///
    /// Lookup is restricted to file entries; a name that only matches a
    /// directory reports `EntryNotFound`.
    pub fn read(&self, name: &str) -> Result<&[u8]> {
        let i = self.index(name, Some(EntryKind::File))?;
        match &self.entries[i] {
            Entry::File { content, .. } => Ok(content),
            Entry::Directory { .. } => Err(PsuError::EntryNotFound(name.to_string())),
        }
    }

    /// Remove and return the first entry matching the given name
    pub fn delete(&mut self, name: &str) -> Result<Entry> {
        let i = self.index(name, None)?;
        Ok(self.entries.remove(i))
    }

    /// Get the first entry matching the given name
    pub fn get(&self, name: &str) -> Result<&Entry> {
        let i = self.index(name, None)?;
        Ok(&self.entries[i])
    }

    /// Does the archive contain an entry with the given name?
    pub fn has(&self, name: &str) -> bool {
        self.index(name, None).is_ok()
    }

    /// Is the first entry with the given name a file?
    pub fn is_file(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_file())
    }

    /// Is the first entry with the given name a directory?
    pub fn is_directory(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_directory())
    }

    /// The entries in on-disk order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the archive empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a file from disk and write its bytes under the given entry name
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P, name: &str) -> Result<()> {
        let data = fs::read(path.as_ref())?;
        self.write(name, data)
    }

    /// Write the named file entry's content out to a file on disk
    pub fn export_file<P: AsRef<Path>>(&self, name: &str, path: P) -> Result<()> {
        let content = self.read(name)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Index of the first entry matching `name`, optionally restricted to a
    /// single entry kind
    fn index(&self, name: &str, kind: Option<EntryKind>) -> Result<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name() == name && kind.map_or(true, |k| entry.kind() == k))
            .ok_or_else(|| PsuError::EntryNotFound(name.to_string()))
    }
}

impl fmt::Display for Psu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total {}", self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
