//! Atomic file output.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// The destination either receives the complete content or is left
/// untouched; the temporary file is removed on every failure path.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".pqreport-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::write(path, e))?;

    file.write_all(bytes).map_err(|e| Error::write(path, e))?;
    file.as_file().sync_all().map_err(|e| Error::write(path, e))?;

    // A failed persist hands the temporary file back; dropping it deletes it.
    file.persist(path).map_err(|e| Error::write(path, e.error))?;

    log::debug!("persisted {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
