//! Error types for payload decoding and archive handling.

use std::path::PathBuf;

/// The reasons a single compressed stream can fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The compressed stream ended before the requested output was produced.
    #[error(
        "compressed stream exhausted at byte {offset} after producing {produced} bytes"
    )]
    MalformedInput { offset: usize, produced: usize },

    /// A back-reference addressed window contents that were never written.
    #[error(
        "back-reference to unwritten window position {position} after producing {produced} bytes"
    )]
    InvalidBackReference { position: usize, produced: usize },

    /// The requested output length was rejected before decoding started.
    #[error("requested output length {requested} is outside 1..={limit}")]
    InvalidRequest { requested: i64, limit: usize },
}

/// Errors raised while reading archives and the files stored inside them.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("truncated {what} at byte {offset}")]
    Truncated { what: &'static str, offset: usize },

    #[error("entry name at byte {offset} is not ASCII")]
    InvalidName { offset: usize },

    #[error("entry name {name:?} does not map to a relative path")]
    UnsafeName { name: String },

    #[error("entry {name:?} spans {offset}..{end} but the archive is {len} bytes")]
    EntryOutOfBounds {
        name: String,
        offset: usize,
        end: usize,
        len: usize,
    },

    #[error("invalid {what} count {count}")]
    BadCount { what: &'static str, count: i64 },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// Wraps an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArchiveError::Io {
            path: path.into(),
            source,
        }
    }
}
