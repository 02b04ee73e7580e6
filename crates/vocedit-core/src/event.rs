//! Events dispatched into the orchestrator
//!
//! UI events form the public surface. Actor results re-enter as
//! `ActorDone` / `ActorFailed`, tagged with the invocation that produced
//! them so late results can be recognised and dropped.

use crate::error::ActorError;
use crate::file::FileHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use vocedit_auth::AuthCheck;
use vocedit_graph::Iri;

/// Payload of `resource.create.confirm`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDraft {
    /// Class of the new resource (scheme, concept, collection)
    pub resource_type: Option<Iri>,
    /// Identifier of the new resource
    pub iri: Option<Iri>,
}

impl ResourceDraft {
    /// Draft with both fields present
    #[must_use]
    pub fn new(resource_type: Iri, iri: Iri) -> Self {
        Self {
            resource_type: Some(resource_type),
            iri: Some(iri),
        }
    }
}

/// Parallel region of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// File and resource workflow
    Project,
    /// Session workflow
    Auth,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Auth => f.write_str("auth"),
        }
    }
}

/// Identity of one actor invocation
///
/// Generations increase monotonically across the whole machine, so an id
/// is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId {
    /// Region whose state started the actor
    pub region: Region,
    /// Machine-wide sequence number
    pub generation: u64,
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.region, self.generation)
    }
}

/// Successful actor results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorOutput {
    /// open-file: the chosen handle and its (already parsed once) text
    FileOpened {
        /// Chosen file
        file_handle: FileHandle,
        /// Document text
        contents: String,
    },
    /// save-file / save-file-as: handle now holding the document
    FileSaved {
        /// File written
        file_handle: FileHandle,
    },
    /// create-resource
    ResourceCreated {
        /// Class of the new resource
        resource_type: Iri,
        /// Its IRI
        iri: Iri,
    },
    /// delete-resource
    ResourceDeleted {
        /// Removed resource
        iri: Iri,
    },
    /// check-auth
    AuthChecked(AuthCheck),
    /// sign-in: the user agent has been sent away
    SignInStarted,
}

/// Everything the orchestrator reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `project.new`: start a project around a concept scheme
    ProjectNew {
        /// Scheme seeded into the empty graph
        concept_scheme: Iri,
    },
    /// `project.open.file`
    ProjectOpenFile,
    /// `project.open.file.cancel`
    ProjectOpenFileCancel,
    /// `project.save`
    ProjectSave,
    /// `project.save.as`
    ProjectSaveAs,
    /// `project.save.cancel`
    ProjectSaveCancel,
    /// `project.close`
    ProjectClose,
    /// `resource.create`: open the dialog
    ResourceCreate,
    /// `resource.create.confirm`
    ResourceCreateConfirm(ResourceDraft),
    /// `resource.create.cancel`
    ResourceCreateCancel,
    /// `resource.delete`: ask before deleting
    ResourceDelete {
        /// Resource to remove
        resource_iri: Iri,
    },
    /// `resource.delete.confirm`
    ResourceDeleteConfirm,
    /// `resource.delete.cancel`
    ResourceDeleteCancel,
    /// `validation.view.report`
    ValidationViewReport,
    /// `validation.view.report.close`
    ValidationViewReportClose,
    /// `auth.request`: start sign-in
    AuthRequest,
    /// `auth.profile`
    AuthProfile,
    /// `auth.profile.close`
    AuthProfileClose,
    /// `auth.logout`
    AuthLogout,
    /// `auth.recheck`
    AuthRecheck,
    /// Actor finished
    ActorDone {
        /// Invocation the result belongs to
        invocation: InvocationId,
        /// What the actor produced
        output: ActorOutput,
    },
    /// Actor reported a failure
    ActorFailed {
        /// Invocation the result belongs to
        invocation: InvocationId,
        /// Why it failed
        error: ActorError,
    },
}

impl Event {
    /// Stable dotted name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProjectNew { .. } => "project.new",
            Self::ProjectOpenFile => "project.open.file",
            Self::ProjectOpenFileCancel => "project.open.file.cancel",
            Self::ProjectSave => "project.save",
            Self::ProjectSaveAs => "project.save.as",
            Self::ProjectSaveCancel => "project.save.cancel",
            Self::ProjectClose => "project.close",
            Self::ResourceCreate => "resource.create",
            Self::ResourceCreateConfirm(_) => "resource.create.confirm",
            Self::ResourceCreateCancel => "resource.create.cancel",
            Self::ResourceDelete { .. } => "resource.delete",
            Self::ResourceDeleteConfirm => "resource.delete.confirm",
            Self::ResourceDeleteCancel => "resource.delete.cancel",
            Self::ValidationViewReport => "validation.view.report",
            Self::ValidationViewReportClose => "validation.view.report.close",
            Self::AuthRequest => "auth.request",
            Self::AuthProfile => "auth.profile",
            Self::AuthProfileClose => "auth.profile.close",
            Self::AuthLogout => "auth.logout",
            Self::AuthRecheck => "auth.recheck",
            Self::ActorDone { .. } => "actor.done",
            Self::ActorFailed { .. } => "actor.failed",
        }
    }

    /// Invocation an actor result belongs to
    #[must_use]
    pub fn invocation(&self) -> Option<InvocationId> {
        match self {
            Self::ActorDone { invocation, .. } | Self::ActorFailed { invocation, .. } => {
                Some(*invocation)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.invocation() {
            Some(invocation) => write!(f, "{} ({invocation})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_results_carry_their_invocation() {
        let invocation = InvocationId {
            region: Region::Auth,
            generation: 3,
        };
        let event = Event::ActorDone {
            invocation,
            output: ActorOutput::SignInStarted,
        };

        assert_eq!(event.invocation(), Some(invocation));
        assert_eq!(event.to_string(), "actor.done (auth#3)");
        assert_eq!(Event::ProjectSaveAs.invocation(), None);
        assert_eq!(Event::ProjectSaveAs.to_string(), "project.save.as");
    }
}
