//! File handles and the picker capability
//!
//! A `FileHandle` is an opaque reference to a file the user chose. Two
//! handles are equal only if they came from the same pick.

use crate::error::ActorError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use ulid::Ulid;

/// Read/write access behind a handle
#[async_trait]
pub trait FileAccess: Send + Sync + fmt::Debug {
    /// Display name of the file
    fn name(&self) -> String;

    /// Read the whole file as text
    async fn read_text(&self) -> Result<String, ActorError>;

    /// Replace the file's contents
    async fn write_text(&self, text: &str) -> Result<(), ActorError>;
}

/// Native file chooser
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Let the user choose an existing document
    ///
    /// Dismissal is reported as `ActorError::Cancelled`.
    async fn open(&self) -> Result<FileHandle, ActorError>;

    /// Let the user choose a destination, proposing `suggested_name`
    async fn save_as(&self, suggested_name: &str) -> Result<FileHandle, ActorError>;
}

/// Reference to a chosen file
#[derive(Clone)]
pub struct FileHandle {
    id: Ulid,
    file: Arc<dyn FileAccess>,
}

impl FileHandle {
    /// Wrap a freshly chosen file
    pub fn new(file: impl FileAccess + 'static) -> Self {
        Self::from_arc(Arc::new(file))
    }

    /// Wrap shared file access
    #[must_use]
    pub fn from_arc(file: Arc<dyn FileAccess>) -> Self {
        Self {
            id: Ulid::new(),
            file,
        }
    }

    /// Identity of the pick
    #[inline]
    #[must_use]
    pub fn id(&self) -> Ulid {
        self.id
    }

    /// Display name of the file
    #[must_use]
    pub fn name(&self) -> String {
        self.file.name()
    }

    /// Read the whole file as text
    ///
    /// # Errors
    /// Whatever the underlying access reports.
    pub async fn read_text(&self) -> Result<String, ActorError> {
        self.file.read_text().await
    }

    /// Replace the file's contents
    ///
    /// # Errors
    /// Whatever the underlying access reports.
    pub async fn write_text(&self, text: &str) -> Result<(), ActorError> {
        self.file.write_text(text).await
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FileHandle {}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("id", &self.id)
            .field("name", &self.file.name())
            .finish()
    }
}

/// File on the local file system
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    /// Access `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileAccess for LocalFile {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    async fn read_text(&self) -> Result<String, ActorError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ActorError::Read(format!("{}: {e}", self.path.display())))
    }

    async fn write_text(&self, text: &str) -> Result<(), ActorError> {
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| ActorError::Write(format!("{}: {e}", self.path.display())))
    }
}

/// File held in memory
#[derive(Debug, Default)]
pub struct MemoryFile {
    name: String,
    contents: RwLock<String>,
}

impl MemoryFile {
    /// In-memory file with initial contents
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: RwLock::new(contents.into()),
        }
    }

    /// Current contents
    #[must_use]
    pub fn contents(&self) -> String {
        self.contents.read().clone()
    }
}

#[async_trait]
impl FileAccess for MemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_text(&self) -> Result<String, ActorError> {
        Ok(self.contents())
    }

    async fn write_text(&self, text: &str) -> Result<(), ActorError> {
        *self.contents.write() = text.to_string();
        Ok(())
    }
}
