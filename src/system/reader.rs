use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use super::error::ProcfsError;

pub const DEFAULT_PROCFS_ROOT: &str = "/proc";

/// A display value cut to a fixed capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundedString {
    pub value: String,
    pub truncated: bool,
}

impl BoundedString {
    /// Keeps at most `max_chars` characters of `value`.
    pub fn bound(value: &str, max_chars: usize) -> Self {
        match value.char_indices().nth(max_chars) {
            Some((cut, _)) => BoundedString {
                value: value[..cut].to_string(),
                truncated: true,
            },
            None => BoundedString {
                value: value.to_string(),
                truncated: false,
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for BoundedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Root of a procfs-shaped tree. Every resource is resolved relative to it,
/// so a fixture directory can stand in for the live `/proc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcRoot {
    path: PathBuf,
}

impl Default for ProcRoot {
    fn default() -> Self {
        Self::new(DEFAULT_PROCFS_ROOT)
    }
}

impl ProcRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProcRoot { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.path.join(rel)
    }

    /// Opens `root/rel` read-only. The root is checked first so that a
    /// missing root is reported separately from a missing resource.
    pub fn open(&self, rel: impl AsRef<Path>) -> Result<File, ProcfsError> {
        File::open(&self.path).map_err(|source| ProcfsError::RootUnavailable {
            path: self.path.clone(),
            source,
        })?;

        let path = self.resolve(rel);
        File::open(&path).map_err(|source| ProcfsError::Unavailable { path, source })
    }

    /// Reads the first line of `rel`, keeping at most `capacity` bytes.
    ///
    /// The trailing newline is stripped. A final line without a newline is
    /// returned as is. Longer lines are cut and flagged as truncated.
    pub fn read_line(
        &self,
        rel: impl AsRef<Path>,
        capacity: usize,
    ) -> Result<BoundedString, ProcfsError> {
        let rel = rel.as_ref();
        let path = self.resolve(rel);
        let file = self.open(rel)?;

        // One extra byte tells a line of exactly `capacity` bytes apart
        // from a longer one.
        let mut buf = Vec::with_capacity(capacity.saturating_add(1).min(4096));
        BufReader::new(file)
            .take((capacity as u64).saturating_add(1))
            .read_until(b'\n', &mut buf)
            .map_err(|source| ProcfsError::Read {
                path: path.clone(),
                source,
            })?;

        if buf.is_empty() {
            return Err(ProcfsError::malformed(path, "empty resource"));
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        let truncated = buf.len() > capacity;
        buf.truncate(capacity);

        Ok(BoundedString {
            value: String::from_utf8_lossy(&buf).into_owned(),
            truncated,
        })
    }

    /// Reads the whole first line of `rel` into a growable buffer.
    pub fn read_line_unbounded(&self, rel: impl AsRef<Path>) -> Result<String, ProcfsError> {
        let rel = rel.as_ref();
        let path = self.resolve(rel);
        let file = self.open(rel)?;

        let mut buf = Vec::new();
        BufReader::new(file)
            .read_until(b'\n', &mut buf)
            .map_err(|source| ProcfsError::Read {
                path: path.clone(),
                source,
            })?;

        if buf.is_empty() {
            return Err(ProcfsError::malformed(path, "empty resource"));
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Iterates over every line of `rel`. The file is closed when the
    /// iterator is dropped.
    pub fn lines(
        &self,
        rel: impl AsRef<Path>,
    ) -> Result<impl Iterator<Item = Result<String, ProcfsError>>, ProcfsError> {
        let rel = rel.as_ref();
        let path = self.resolve(rel);
        let file = self.open(rel)?;

        Ok(BufReader::new(file).lines().map(move |line| {
            line.map_err(|source| ProcfsError::Read {
                path: path.clone(),
                source,
            })
        }))
    }

    /// Reads all of `rel`. Invalid UTF-8 (task names set through prctl can
    /// hold any byte) is replaced, never an error.
    pub fn read_to_string(&self, rel: impl AsRef<Path>) -> Result<String, ProcfsError> {
        let rel = rel.as_ref();
        let path = self.resolve(rel);
        let mut file = self.open(rel)?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|source| ProcfsError::Read { path, source })?;
        Ok(String::from_utf8_lossy(&contents).into_owned())
    }

    pub fn entries(&self) -> Result<fs::ReadDir, ProcfsError> {
        fs::read_dir(&self.path).map_err(|source| ProcfsError::RootUnavailable {
            path: self.path.clone(),
            source,
        })
    }
}
