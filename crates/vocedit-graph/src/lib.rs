//! VocEdit Graph - the vocabulary data store
//!
//! Provides the pieces the editor orchestrator treats as an opaque capability:
//! - IRIs, nodes, literals and triples
//! - An ordered in-memory graph with Turtle reading and canonical writing
//! - The `ResourceManager` capability with edit sessions
//!
//! # Example
//!
//! ```rust
//! use vocedit_graph::{namespaces::skos, Graph, Iri};
//!
//! let text = "@prefix skos: <http://www.w3.org/2004/02/skos/core#> .\n\
//!     <https://example.org/scheme> a skos:ConceptScheme .\n";
//! let graph = Graph::parse(text).unwrap();
//! let schemes = graph.instances_of(&skos::concept_scheme());
//! assert_eq!(schemes, vec![Iri::new("https://example.org/scheme").unwrap()]);
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod graph;
pub mod iri;
pub mod namespaces;
pub mod resource_manager;
pub mod term;
pub mod turtle;

pub use error::GraphError;
pub use graph::Graph;
pub use iri::Iri;
pub use resource_manager::{InMemoryResourceManager, ResourceManager};
pub use term::{Literal, Node, Term, Triple};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
