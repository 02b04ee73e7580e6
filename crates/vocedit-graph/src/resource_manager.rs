//! Resource manager capability
//!
//! The orchestrator never touches the graph directly; it goes through this
//! trait so the store (and its edit-session bookkeeping) can be swapped.

use crate::error::GraphError;
use crate::graph::Graph;
use crate::iri::Iri;
use crate::term::{Node, Triple};
use parking_lot::RwLock;
use std::fmt;

/// Mutation and query surface of the vocabulary store
pub trait ResourceManager: Send + Sync + fmt::Debug {
    /// Replace the data graph with the parsed document (empty text clears it)
    ///
    /// # Errors
    /// - `GraphError::Parse` if the text is not a valid document
    fn reset_graph(&self, text: &str) -> Result<(), GraphError>;

    /// Add statements to the data graph
    fn add_statements(&self, statements: Vec<Triple>);

    /// Remove a resource and every statement referencing it
    ///
    /// # Errors
    /// - `GraphError::ResourceNotFound` if the IRI is not a subject
    fn delete_resource(&self, iri: &Iri) -> Result<(), GraphError>;

    /// Whether a form edit session is open
    fn is_editing(&self) -> bool;

    /// Open an edit session
    fn start_editing(&self);

    /// Abandon the open edit session
    fn cancel_editing(&self);

    /// Commit the open edit session
    ///
    /// # Errors
    /// - `GraphError::NotEditing` if no session is open
    fn save(&self) -> Result<(), GraphError>;

    /// Snapshot of the data graph
    fn data_graph(&self) -> Graph;
}

#[derive(Debug, Default)]
struct StoreState {
    graph: Graph,
    editing: bool,
    revision: u64,
}

/// `ResourceManager` backed by an in-process graph
#[derive(Debug, Default)]
pub struct InMemoryResourceManager {
    state: RwLock<StoreState>,
}

impl InMemoryResourceManager {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `graph`
    #[must_use]
    pub fn with_graph(graph: Graph) -> Self {
        Self {
            state: RwLock::new(StoreState {
                graph,
                ..StoreState::default()
            }),
        }
    }

    /// Monotonic counter bumped by every committed change
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }
}

impl ResourceManager for InMemoryResourceManager {
    fn reset_graph(&self, text: &str) -> Result<(), GraphError> {
        let graph = Graph::parse(text)?;
        let mut state = self.state.write();
        tracing::debug!(triples = graph.len(), "Resetting data graph");
        state.graph = graph;
        state.editing = false;
        state.revision += 1;
        Ok(())
    }

    fn add_statements(&self, statements: Vec<Triple>) {
        let mut state = self.state.write();
        state.graph.extend(statements);
        state.revision += 1;
    }

    fn delete_resource(&self, iri: &Iri) -> Result<(), GraphError> {
        let mut state = self.state.write();
        if !state.graph.contains_subject(&Node::Iri(iri.clone())) {
            return Err(GraphError::ResourceNotFound(iri.clone()));
        }
        let removed = state.graph.remove_resource(iri);
        state.revision += 1;
        tracing::debug!(%iri, removed, "Deleted resource");
        Ok(())
    }

    fn is_editing(&self) -> bool {
        self.state.read().editing
    }

    fn start_editing(&self) {
        self.state.write().editing = true;
    }

    fn cancel_editing(&self) {
        self.state.write().editing = false;
    }

    fn save(&self) -> Result<(), GraphError> {
        let mut state = self.state.write();
        if !state.editing {
            return Err(GraphError::NotEditing);
        }
        state.editing = false;
        state.revision += 1;
        Ok(())
    }

    fn data_graph(&self) -> Graph {
        self.state.read().graph.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::{rdf, skos};

    fn scheme() -> Iri {
        Iri::new("https://example.org/scheme").unwrap()
    }

    #[test]
    fn reset_graph_replaces_contents_and_ends_editing() {
        let manager = InMemoryResourceManager::new();
        manager.add_statements(vec![Triple::new(
            scheme(),
            rdf::type_(),
            skos::concept_scheme(),
        )]);
        manager.start_editing();

        manager.reset_graph("").unwrap();

        assert!(manager.data_graph().is_empty());
        assert!(!manager.is_editing());
    }

    #[test]
    fn reset_graph_rejects_malformed_text_and_keeps_graph() {
        let manager = InMemoryResourceManager::new();
        manager.add_statements(vec![Triple::new(
            scheme(),
            rdf::type_(),
            skos::concept_scheme(),
        )]);

        assert!(manager.reset_graph("not a statement").is_err());
        assert_eq!(manager.data_graph().len(), 1);
    }

    #[test]
    fn delete_unknown_resource_is_rejected() {
        let manager = InMemoryResourceManager::new();
        let result = manager.delete_resource(&scheme());
        assert_eq!(result, Err(GraphError::ResourceNotFound(scheme())));
    }

    #[test]
    fn save_requires_edit_session() {
        let manager = InMemoryResourceManager::new();
        assert_eq!(manager.save(), Err(GraphError::NotEditing));

        manager.start_editing();
        let before = manager.revision();
        manager.save().unwrap();
        assert!(!manager.is_editing());
        assert_eq!(manager.revision(), before + 1);
    }
}
