use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, replacing any previous version
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_replacing(&self.path(base), &self.render())
    }
}

/// Write `content` to `path`, deleting an existing file first.
///
/// Parent directories are created as needed. The replacement is not atomic:
/// a failure between the delete and the write leaves no file behind.
pub fn write_replacing(path: &Path, content: &str) -> Result<WriteResult> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let result = if path.exists() {
        std::fs::remove_file(path)?;
        WriteResult::Replaced
    } else {
        WriteResult::Created
    };

    std::fs::write(path, content)?;
    Ok(result)
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File did not exist before
    Created,
    /// An existing file was deleted and written again
    Replaced,
}
