use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a shred operation.
///
/// Every variant except [`ShredError::Remove`] means the file is still on
/// disk with its content untouched or only partially overwritten.
#[derive(Debug, Error)]
pub enum ShredError {
    /// The target could not be opened for read-write access
    #[error("opening {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file length could not be queried
    #[error("reading file length: {0}")]
    Stat(#[source] io::Error),

    /// A pass was started without a file handle
    #[error("file handle is not available")]
    InvalidHandle,

    /// A pass was started with a zero-sized buffer
    #[error("buffer size must be greater than 0, got {0}")]
    InvalidBufferSize(usize),

    /// The randomness stream could not fill the buffer
    #[error("reading random data: {0}")]
    RandomSource(#[source] rand_core::Error),

    /// A stride could not be written in full
    #[error("writing {len} bytes at offset {offset}: {source}")]
    Write {
        offset: u64,
        len: usize,
        #[source]
        source: io::Error,
    },

    /// Overwritten data could not be flushed to storage
    #[error("flushing overwritten data: {0}")]
    Sync(#[source] io::Error),

    /// A pass worker died before reporting
    #[error("overwrite pass aborted: {0}")]
    PassAborted(String),

    /// Every pass succeeded but the path could not be unlinked
    #[error("{} was overwritten but could not be removed: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ShredError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn remove(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Remove {
            path: path.into(),
            source,
        }
    }

    /// True when the content was fully overwritten and only the unlink failed.
    pub fn content_destroyed(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }
}
