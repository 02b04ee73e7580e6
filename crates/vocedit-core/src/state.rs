//! State values of both regions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags attached to states the UI renders specially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Create-resource dialog is open
    CreateResourceDialog,
    /// Delete confirmation is open
    DeleteResourceDialog,
    /// Validation report is shown
    ValidationReport,
    /// A save or save-as is running
    Saving,
    /// Last save failed
    SavingError,
}

impl Tag {
    /// Tag name as the UI sees it
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateResourceDialog => "createResourceDialog",
            Self::DeleteResourceDialog => "deleteResourceDialog",
            Self::ValidationReport => "validationReport",
            Self::Saving => "saving",
            Self::SavingError => "savingError",
        }
    }
}

/// Project region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectState {
    #[default]
    /// No project loaded
    Empty,
    /// Waiting on the open picker and read
    OpeningLocalFile,
    Opened(OpenedState),
}

/// Substates of an opened project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OpenedState {
    #[default]
    /// Nothing in progress
    Idle,
    /// Collecting a new resource
    CreateResourceDialog,
    /// Create actor running
    CreateResource,
    /// Awaiting delete confirmation
    DeleteResourceDialog,
    /// Delete actor running
    DeleteResource,
    /// Report panel open
    ValidationReport,
    /// Writing to the current file
    Saving,
    /// Picking a destination and writing
    SavingAs,
    /// Save failed; error kept in context
    SavingError,
}

impl ProjectState {
    /// Dotted path, e.g. `project.opened.idle`
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Empty => "project.empty",
            Self::OpeningLocalFile => "project.openingLocalFile",
            Self::Opened(opened) => match opened {
                OpenedState::Idle => "project.opened.idle",
                OpenedState::CreateResourceDialog => "project.opened.createResourceDialog",
                OpenedState::CreateResource => "project.opened.createResource",
                OpenedState::DeleteResourceDialog => "project.opened.deleteResourceDialog",
                OpenedState::DeleteResource => "project.opened.deleteResource",
                OpenedState::ValidationReport => "project.opened.validationReport",
                OpenedState::Saving => "project.opened.saving",
                OpenedState::SavingAs => "project.opened.savingAs",
                OpenedState::SavingError => "project.opened.savingError",
            },
        }
    }

    /// Tag of the current state, if any
    #[must_use]
    pub fn tag(self) -> Option<Tag> {
        match self {
            Self::Opened(OpenedState::CreateResourceDialog) => Some(Tag::CreateResourceDialog),
            Self::Opened(OpenedState::DeleteResourceDialog) => Some(Tag::DeleteResourceDialog),
            Self::Opened(OpenedState::ValidationReport) => Some(Tag::ValidationReport),
            Self::Opened(OpenedState::Saving | OpenedState::SavingAs) => Some(Tag::Saving),
            Self::Opened(OpenedState::SavingError) => Some(Tag::SavingError),
            _ => None,
        }
    }

    /// Whether a project is open
    #[inline]
    #[must_use]
    pub fn is_opened(self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Auth region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthState {
    #[default]
    /// Initial session check running
    Checking,
    Authenticated(ProfileView),
    /// Signed out
    Unauthenticated,
    /// Sign-in redirect under way
    Authenticating,
}

/// Profile panel toggle inside `authenticated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfileView {
    #[default]
    /// Panel closed
    Empty,
    /// Panel open
    Profile,
}

impl AuthState {
    /// Dotted path, e.g. `auth.authenticated.profile`
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Checking => "auth.checking",
            Self::Authenticated(ProfileView::Empty) => "auth.authenticated.empty",
            Self::Authenticated(ProfileView::Profile) => "auth.authenticated.profile",
            Self::Unauthenticated => "auth.unauthenticated",
            Self::Authenticating => "auth.authenticating",
        }
    }

    /// Whether a user is signed in
    #[inline]
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Check a dotted path against a state path, matching whole segments
///
/// `project.opened` matches `project.opened.idle` but not
/// `project.openingLocalFile`.
#[must_use]
pub fn path_matches(state_path: &str, prefix: &str) -> bool {
    state_path == prefix
        || state_path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}
