use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to sample one procfs resource.
///
/// Truncation is not an error: bounded reads report it through
/// [`BoundedString::truncated`](super::reader::BoundedString).
#[derive(Debug, Error)]
pub enum ProcfsError {
    #[error("procfs root {} is unavailable: {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed content in {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl ProcfsError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ProcfsError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the resource could not be opened or read at all, as
    /// opposed to being readable but wrongly formatted.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, ProcfsError::Malformed { .. })
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            ProcfsError::RootUnavailable { path, .. }
            | ProcfsError::Unavailable { path, .. }
            | ProcfsError::Read { path, .. }
            | ProcfsError::Malformed { path, .. } => path,
        }
    }
}
