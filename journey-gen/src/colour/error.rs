//! Colour cache error types.

use std::path::PathBuf;

/// Errors reading or writing the colour cache.
#[derive(Debug, thiserror::Error)]
pub enum ColourError {
    /// The cache file or directory could not be read or written
    #[error("colour cache IO error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cache record exists but does not hold two colours
    #[error("corrupt colour cache record at {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl ColourError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ColourError::CacheIo {
            path: path.into(),
            source,
        }
    }
}
