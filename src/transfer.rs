//! Moving form documents in and out of the designer

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Source and sink for encoded form documents
#[cfg_attr(test, mockall::automock)]
pub trait DocumentTransfer {
    /// Read a whole document
    fn read(&self) -> Result<Vec<u8>>;

    /// Write a whole document, replacing what was there
    fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Where documents go, for status messages
    fn describe(&self) -> String;
}

/// Documents stored in a file on disk
#[derive(Debug, Clone)]
pub struct FileTransfer {
    path: PathBuf,
}

impl FileTransfer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl DocumentTransfer for FileTransfer {
    fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).with_context(|| format!("failed to read {}", self.path.display()))
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, bytes)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Documents exchanged through the system clipboard
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipboardTransfer;

impl DocumentTransfer for ClipboardTransfer {
    fn read(&self) -> Result<Vec<u8>> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        Ok(clipboard.get_text()?.into_bytes())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(String::from_utf8_lossy(bytes).into_owned())?;
        Ok(())
    }

    fn describe(&self) -> String {
        "clipboard".to_string()
    }
}
