//! Whole-document persistence port.
//!
//! A store never edits its file in place: it reads the complete document
//! once when opened and replaces the complete document on every save.
//! [`FileStorage`] does this against the filesystem and [`MemoryStorage`]
//! against a shared in-memory buffer.

use std::cell::RefCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::Result;

/// Backing document of a single store.
pub trait Storage {
    /// Return the stored document, or `None` if nothing has been saved yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document with `contents`.
    fn write(&self, contents: &str) -> Result<()>;
}

/// A single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        // fs::write truncates: the file is always replaced, never appended to
        std::fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), bytes = contents.len(), "wrote store file");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    contents: Option<String>,
    fail_writes: bool,
}

/// In-memory document used in tests.
///
/// Clones share the same buffer, so a second store opened on a clone sees
/// everything the first one saved.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `contents` already stored.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.inner.borrow_mut().contents = Some(contents.into());
        storage
    }

    /// Current document, as last written.
    pub fn contents(&self) -> Option<String> {
        self.inner.borrow().contents.clone()
    }

    /// Make every subsequent [`Storage::write`] fail until switched off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.inner.borrow().contents.clone())
    }

    fn write(&self, contents: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(std::io::Error::new(ErrorKind::PermissionDenied, "write refused").into());
        }
        inner.contents = Some(contents.to_string());
        Ok(())
    }
}
