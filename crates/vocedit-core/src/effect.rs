//! Side effects requested by transitions
//!
//! The machine only describes what should happen; the effect bridge and
//! the actor runner carry it out.

use crate::event::{InvocationId, ResourceDraft};
use crate::file::FileHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use vocedit_graph::Iri;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Operation completed
    Success,
    /// Operation failed or was refused
    Error,
}

/// A toast for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: Level,
    /// Headline shown to the user
    pub title: String,
    /// Optional detail under the headline
    pub description: Option<String>,
}

impl Notification {
    /// Success toast
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            title: title.into(),
            description: None,
        }
    }

    /// Error toast
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: title.into(),
            description: None,
        }
    }

    /// With secondary text
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {description}", self.title),
            None => f.write_str(&self.title),
        }
    }
}

/// Application routes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Route {
    /// `/`
    #[default]
    Home,
    /// `/resource?iri=...`
    Resource(Iri),
}

impl Route {
    /// IRI shown by the route, if any
    #[must_use]
    pub fn resource(&self) -> Option<&Iri> {
        match self {
            Self::Home => None,
            Self::Resource(iri) => Some(iri),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Resource(iri) => {
                let encoded: String =
                    url::form_urlencoded::byte_serialize(iri.as_str().as_bytes()).collect();
                write!(f, "/resource?iri={encoded}")
            }
        }
    }
}

/// Work an actor should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorRequest {
    /// Pick a file and read it
    OpenFile,
    /// Serialize the graph into the project file
    SaveFile {
        /// Destination
        file_handle: FileHandle,
    },
    /// Pick a destination, then save there
    SaveFileAs,
    /// Add a resource to the graph
    CreateResource(ResourceDraft),
    /// Remove a resource from the graph
    DeleteResource(Iri),
    /// Resolve the session into a profile
    CheckAuth,
    /// Build the authorization request and redirect
    SignIn,
}

impl ActorRequest {
    /// Actor name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenFile => "open-file",
            Self::SaveFile { .. } => "save-file",
            Self::SaveFileAs => "save-file-as",
            Self::CreateResource(_) => "create-resource",
            Self::DeleteResource(_) => "delete-resource",
            Self::CheckAuth => "check-auth",
            Self::SignIn => "sign-in",
        }
    }
}

/// An actor request bound to the state that made it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Token the result must carry to be accepted
    pub id: InvocationId,
    /// What to run
    pub request: ActorRequest,
}

/// Side effect emitted by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Clear the data graph
    ResetGraph,
    /// Replace the data graph with a document
    LoadGraph(String),
    /// Seed a new project around a concept scheme
    SeedProject(Iri),
    /// Start an actor
    Invoke(Invocation),
    /// Show a toast
    Notify(Notification),
    /// Push a route
    Navigate(Route),
    /// Go home if the current route shows this resource
    LeaveResource(Iri),
    /// Forget the persisted session token
    EvictSession,
}
