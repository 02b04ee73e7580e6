//! Error types for the orchestrator

use std::path::PathBuf;
use std::time::Duration;
use vocedit_auth::AuthError;
use vocedit_graph::GraphError;

/// Failure reported by an async operation actor
///
/// Actors never decide user-visible wording; the machine's failure
/// transitions do. The `Display` form is the detail those transitions
/// embed in notifications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActorError {
    /// Picker dismissed or operation aborted by the user
    #[error("{0}")]
    Cancelled(String),

    /// Create request lacks a type or an IRI
    #[error("Missing required fields: type and iri are required")]
    MissingFields,

    /// Graph has no concept scheme to link to
    #[error("No concept scheme found")]
    NoConceptScheme,

    /// Graph has more than one concept scheme
    #[error("Multiple concept schemes found")]
    MultipleConceptSchemes,

    /// File could not be read
    #[error("{0}")]
    Read(String),

    /// File could not be written
    #[error("{0}")]
    Write(String),

    /// Store rejected the operation
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Serialization through the pretty-printer failed
    #[error(transparent)]
    Prettify(#[from] PrettifyError),

    /// Session or profile lookup failed
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ActorError {
    /// Check if the failure is a user cancellation rather than a fault
    ///
    /// Pickers report dismissal with an "aborted" message, so read failures
    /// carrying that wording count as well.
    #[must_use]
    pub fn is_user_cancelled(&self) -> bool {
        match self {
            Self::Cancelled(_) => true,
            Self::Read(message) => message.to_ascii_lowercase().contains("aborted"),
            _ => false,
        }
    }
}

/// Pretty-printer failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrettifyError {
    /// Worker did not answer within the deadline
    #[error("prettify timed out after {0:?}")]
    Timeout(Duration),

    /// Input is not a readable document
    #[error("malformed document: {0}")]
    Malformed(String),

    /// Worker task is no longer running
    #[error("prettify worker is gone")]
    WorkerGone,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for `EditorConfig`
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid config value for {key}: {reason}")]
    Invalid {
        /// Offending key
        key: &'static str,
        /// Why the value was refused
        reason: String,
    },
}
