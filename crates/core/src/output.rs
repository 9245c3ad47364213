//! Persisting the rendered document.

use std::fs;
use std::path::Path;

use crate::Result;

/// Writes `html` to `path`, creating parent directories as needed.
///
/// An existing file is replaced; the reader view always reuses the same path.
pub fn write_document(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, html)?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "document written");

    Ok(())
}
