//! Published view of the machine

use crate::context::MachineContext;
use crate::state::{path_matches, AuthState, ProjectState, Tag};
use serde::Serialize;
use std::fmt;
use vocedit_auth::AuthInfo;
use vocedit_graph::Iri;

/// State and context after an event, detached from the machine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Snapshot {
    /// Project region state
    pub project: ProjectState,
    /// Auth region state
    pub auth_state: AuthState,
    /// Name of the open file, if any
    pub file_name: Option<String>,
    /// Resource awaiting delete confirmation
    pub resource_to_delete: Option<Iri>,
    /// Message of the last failed save
    pub saving_error: Option<String>,
    /// Signed-in user
    pub auth: Option<AuthInfo>,
}

impl Snapshot {
    pub(crate) fn capture(project: ProjectState, auth_state: AuthState, context: &MachineContext) -> Self {
        Self {
            project,
            auth_state,
            file_name: context.file_handle.as_ref().map(|handle| handle.name()),
            resource_to_delete: context.resource_to_delete.clone(),
            saving_error: context.saving_error.clone(),
            auth: context.auth.clone(),
        }
    }

    /// Whether either region is at or below the dotted `path`
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path_matches(self.project.path(), path) || path_matches(self.auth_state.path(), path)
    }

    /// Whether the current state carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.project.tag() == Some(tag)
    }

    /// Tags of the current states
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        self.project.tag().into_iter().collect()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.project, self.auth_state)?;
        if let Some(name) = &self.file_name {
            write!(f, " | file: {name}")?;
        }
        if let Some(iri) = &self.resource_to_delete {
            write!(f, " | deleting: {iri}")?;
        }
        if let Some(error) = &self.saving_error {
            write!(f, " | error: {error}")?;
        }
        if let Some(auth) = &self.auth {
            write!(f, " | user: {}", auth.user.login)?;
        }
        Ok(())
    }
}
