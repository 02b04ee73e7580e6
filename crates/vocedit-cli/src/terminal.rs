//! Terminal stand-ins for the browser's file dialogs and redirects

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use url::Url;
use vocedit_auth::{AuthError, Redirect};
use vocedit_core::{ActorError, FileHandle, FilePicker, LocalFile};

/// Picker answering with a path chosen on the command line
///
/// Each preset answers one pick; a pick with nothing preset counts as the
/// user dismissing the dialog.
#[derive(Debug, Default)]
pub(crate) struct PresetFilePicker {
    next: Mutex<Option<PathBuf>>,
}

impl PresetFilePicker {
    pub(crate) fn preset(&self, path: PathBuf) {
        *self.next.lock() = Some(path);
    }

    /// Drop a preset nothing is going to pick up
    pub(crate) fn clear(&self) {
        if let Some(path) = self.next.lock().take() {
            tracing::debug!(path = %path.display(), "Dropped unused file pick");
        }
    }

    fn take(&self) -> Result<FileHandle, ActorError> {
        match self.next.lock().take() {
            Some(path) => Ok(FileHandle::new(LocalFile::new(path))),
            None => Err(ActorError::Cancelled("The user aborted a request.".to_string())),
        }
    }
}

#[async_trait]
impl FilePicker for PresetFilePicker {
    async fn open(&self) -> Result<FileHandle, ActorError> {
        self.take()
    }

    async fn save_as(&self, suggested_name: &str) -> Result<FileHandle, ActorError> {
        tracing::debug!(suggested_name, "Save-as pick");
        self.take()
    }
}

/// Prints the authorization URL instead of navigating to it
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleRedirect;

impl Redirect for ConsoleRedirect {
    fn redirect(&self, url: &Url) -> Result<(), AuthError> {
        println!("Open this URL to sign in:\n  {url}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preset_answers_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.ttl");
        std::fs::write(&path, "").unwrap();

        let picker = PresetFilePicker::default();
        picker.preset(path);
        let handle = picker.open().await.unwrap();
        assert_eq!(handle.name(), "vocab.ttl");

        let err = picker.open().await.unwrap_err();
        assert!(err.is_user_cancelled());
    }

    #[tokio::test]
    async fn cleared_preset_reads_as_dismissal() {
        let picker = PresetFilePicker::default();
        picker.preset(PathBuf::from("vocab.ttl"));
        picker.clear();

        let err = picker.save_as("untitled.ttl").await.unwrap_err();
        assert!(err.is_user_cancelled());
    }
}
