//! Reads campaign archives (.cam).
//!
//! The first four bytes of an archive hold the offset of the directory. The
//! directory starts with the number of entries, followed by one record per
//! entry:
//!
//! ```text
//!   u8 name_len | name_len ASCII bytes | u32 offset | u32 size
//! ```
//!
//! All numbers are little endian. Entry data is stored uncompressed.

use std::path::{Component, Path, PathBuf};

use crate::utils::cursor::ByteCursor;
use crate::ArchiveError;

/// The smallest directory record: an empty name, an offset and a size.
const MIN_RECORD_LEN: usize = 1 + 4 + 4;

/// A single file stored in an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CamEntry {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

impl CamEntry {
    /// Maps the stored name to a path relative to the extraction directory.
    /// Names may use either '/' or '\' as the separator. Names that are empty,
    /// absolute or that climb out of the directory are rejected.
    pub fn relative_path(&self) -> Result<PathBuf, ArchiveError> {
        let unsafe_name = || ArchiveError::UnsafeName {
            name: self.name.clone(),
        };
        let normalized = self.name.replace('\\', "/");
        let mut path = PathBuf::new();
        for component in Path::new(&normalized).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return Err(unsafe_name()),
            }
        }
        if path.as_os_str().is_empty() {
            return Err(unsafe_name());
        }
        Ok(path)
    }

    fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.size as usize
    }
}

/// A parsed archive that borrows the archive bytes.
pub struct CamArchive<'a> {
    data: &'a [u8],
    entries: Vec<CamEntry>,
}

impl<'a> CamArchive<'a> {
    /// Parse the directory of the archive 'data'.
    pub fn parse(data: &'a [u8]) -> Result<Self, ArchiveError> {
        let truncated = |what, offset| ArchiveError::Truncated { what, offset };

        let mut header = ByteCursor::new(data);
        let dir_offset = header
            .read_u32_le()
            .ok_or_else(|| truncated("archive header", 0))? as usize;

        let mut dir = ByteCursor::at(data, dir_offset)
            .ok_or_else(|| truncated("directory", dir_offset))?;
        let count = dir
            .read_u32_le()
            .ok_or_else(|| truncated("directory", dir_offset))? as usize;

        // Reject counts that can't fit before allocating for them.
        if count > dir.remaining() / MIN_RECORD_LEN {
            return Err(ArchiveError::BadCount {
                what: "directory entry",
                count: count as i64,
            });
        }

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let start = dir.position();
            let record = || truncated("directory record", start);
            let name_len = dir.read_u8().ok_or_else(record)? as usize;
            let name = dir.take(name_len).ok_or_else(record)?;
            if !name.is_ascii() {
                return Err(ArchiveError::InvalidName { offset: start + 1 });
            }
            let offset = dir.read_u32_le().ok_or_else(record)?;
            let size = dir.read_u32_le().ok_or_else(record)?;
            entries.push(CamEntry {
                name: String::from_utf8_lossy(name).into_owned(),
                offset,
                size,
            });
        }

        log::debug!(
            "Read a directory of {} entries at byte {}",
            entries.len(),
            dir_offset
        );
        Ok(Self { data, entries })
    }

    pub fn entries(&self) -> &[CamEntry] {
        &self.entries
    }

    /// Find the entry called 'name'.
    pub fn find(&self, name: &str) -> Option<&CamEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the stored bytes of 'entry'.
    pub fn contents(&self, entry: &CamEntry) -> Result<&'a [u8], ArchiveError> {
        let range = entry.range();
        self.data.get(range.clone()).ok_or_else(|| {
            ArchiveError::EntryOutOfBounds {
                name: entry.name.clone(),
                offset: range.start,
                end: range.end,
                len: self.data.len(),
            }
        })
    }
}
