//! Scoped script file resource
//!
//! Owns the generated script as a temporary file: created on open
//! (optionally with header text), written incrementally, closed (optionally
//! with trailer text), and unlinked when the owner drops so aborted runs do
//! not litter the temp directory.

use crate::error::{InjectorError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Generated script file with a guaranteed-cleanup lifecycle.
///
/// The path stays empty until [`open`](Self::open) allocates the temporary
/// file and persists its name. The file itself outlives
/// [`close`](Self::close) so callers can read, relocate, or execute it;
/// whatever is still on disk when this value drops gets removed.
#[derive(Debug, Default)]
pub struct ScriptFile {
    path: PathBuf,
    writer: Option<File>,
}

impl ScriptFile {
    /// Create an unopened script resource
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a uniquely named temporary file and write `header` if non-empty
    pub fn open(&mut self, header: &str) -> Result<()> {
        let temp_file = tempfile::Builder::new()
            .prefix("inject-")
            .suffix(".sh")
            .tempfile()
            .map_err(|source| InjectorError::ResourceCreation { source })?;

        // Persist the file so the path survives beyond the tempfile guard;
        // cleanup belongs to this type's Drop from here on.
        let (file, path) = temp_file
            .keep()
            .map_err(|e| InjectorError::ResourceCreation { source: e.error })?;

        self.writer = Some(file);
        self.path = path;
        debug!("created script file: {}", self.path.display());

        if !header.is_empty() {
            self.write(header)?;
        }
        Ok(())
    }

    /// Append `data` to the open script file.
    ///
    /// Fails with [`InjectorError::Write`] when the underlying write fails
    /// or when the file is not open; nothing is retried.
    pub fn write(&mut self, data: &str) -> Result<()> {
        let file = self.writer.as_mut().ok_or_else(|| InjectorError::Write {
            path: self.path.clone(),
            source: io::Error::other("script file is not open"),
        })?;

        file.write_all(data.as_bytes())
            .map_err(|source| InjectorError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Write `trailer` if non-empty, then release the write handle.
    ///
    /// The file stays on disk; only the handle closes. Writing after close
    /// fails the same way as writing before open.
    pub fn close(&mut self, trailer: &str) -> Result<()> {
        if !trailer.is_empty() {
            self.write(trailer)?;
        }
        self.writer = None;
        Ok(())
    }

    /// Path of the generated script; empty if never opened
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the write handle is currently open
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }
}

impl Drop for ScriptFile {
    fn drop(&mut self) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        // Release the handle before unlinking. A file already moved or
        // removed by the caller is not an error; anything else (permissions,
        // for instance) is worth surfacing even though Drop cannot fail.
        self.writer = None;
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!(
                    "failed to remove script file {}: {}",
                    self.path.display(),
                    err
                );
            }
        }
    }
}
