//! Release workflows
//!
//! The two procedures behind the binary's subcommands. They take their
//! collaborators (configuration, prompt, version control) as parameters so
//! they can run without clap or a terminal.

pub mod bump;
pub mod changelog;

use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Fails with [ReleaseError::MissingFile] for the first path that is absent.
pub fn require_files(paths: &[&Path]) -> Result<()> {
    match paths.iter().find(|path| !path.is_file()) {
        Some(missing) => Err(ReleaseError::missing_file(*missing)),
        None => Ok(()),
    }
}

/// Reads a file that [require_files] has already checked.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading");
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReleaseError::missing_file(path),
        _ => ReleaseError::Io(e),
    })
}

/// Truncates and rewrites `path` with `contents`.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    tracing::debug!(path = %path.display(), bytes = contents.len(), "writing");
    fs::write(path, contents)?;
    Ok(())
}
