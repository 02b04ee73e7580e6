//! Machine context
//!
//! Owned by the machine and changed only inside transitions. Actors get
//! copies of what they need as input and hand results back as events.

use crate::file::FileHandle;
use std::fmt;
use std::sync::Arc;
use vocedit_auth::AuthInfo;
use vocedit_graph::{Iri, ResourceManager};

/// Shared record both regions read and write
#[derive(Clone)]
pub struct MachineContext {
    /// Vocabulary store shared with the rest of the session
    pub resource_manager: Arc<dyn ResourceManager>,
    /// File the project was opened from or last saved to
    pub file_handle: Option<FileHandle>,
    /// Target of a pending delete
    pub resource_to_delete: Option<Iri>,
    /// Message of the last failed save, kept until acknowledged
    pub saving_error: Option<String>,
    /// Signed-in user
    pub auth: Option<AuthInfo>,
}

impl MachineContext {
    /// Fresh context around a store
    #[must_use]
    pub fn new(resource_manager: Arc<dyn ResourceManager>) -> Self {
        Self {
            resource_manager,
            file_handle: None,
            resource_to_delete: None,
            saving_error: None,
            auth: None,
        }
    }

    /// Drop every project-scoped field
    pub(crate) fn clear_project(&mut self) {
        self.file_handle = None;
        self.resource_to_delete = None;
        self.saving_error = None;
    }
}

impl fmt::Debug for MachineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineContext")
            .field("file_handle", &self.file_handle)
            .field("resource_to_delete", &self.resource_to_delete)
            .field("saving_error", &self.saving_error)
            .field("auth", &self.auth.as_ref().map(|a| &a.user.login))
            .finish_non_exhaustive()
    }
}
