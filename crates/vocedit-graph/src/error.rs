//! Error types for the graph store

use crate::iri::Iri;

/// Graph store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Identifier is not a usable IRI
    #[error("invalid IRI {value:?}: {reason}")]
    InvalidIri {
        /// Rejected text
        value: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// Document could not be read as Turtle
    #[error("could not read document: {0}")]
    Parse(String),

    /// Resource is not a subject in the data graph
    #[error("resource not found: {0}")]
    ResourceNotFound(Iri),

    /// `save` called without an active edit session
    #[error("no edit session in progress")]
    NotEditing,
}
