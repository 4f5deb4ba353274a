//! Artifact persistence.

use std::io::Write;
use std::path::Path;

/// Write generated content to `path`, replacing whatever was there.
///
/// The content is staged in a uniquely named temporary file next to the
/// target and moved into place with a rename, so readers (and competing
/// writers) only ever observe complete artifacts.
pub fn persist_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
