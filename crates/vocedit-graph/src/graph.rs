//! Ordered in-memory triple set

use crate::error::GraphError;
use crate::iri::Iri;
use crate::namespaces::rdf;
use crate::turtle;
use crate::term::{Node, Term, Triple};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// A set of triples with deterministic iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    triples: BTreeSet<Triple>,
}

impl Graph {
    /// Empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a Turtle (or N-Triples) document
    ///
    /// # Errors
    /// - `GraphError::Parse` if the document is malformed
    /// - `GraphError::InvalidIri` if it names a relative IRI
    pub fn parse(text: &str) -> Result<Self, GraphError> {
        turtle::parse(text)
    }

    /// Insert a triple, returning whether it was new
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Number of triples
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph holds no triples
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate triples in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Whether the exact triple is present
    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Whether any triple has `subject` in subject position
    #[must_use]
    pub fn contains_subject(&self, subject: &Node) -> bool {
        self.triples.iter().any(|t| &t.subject == subject)
    }

    /// Subjects of triples matching `? predicate object`
    #[must_use]
    pub fn subjects(&self, predicate: &Iri, object: &Term) -> Vec<Node> {
        let found: BTreeSet<&Node> = self
            .triples
            .iter()
            .filter(|t| &t.predicate == predicate && &t.object == object)
            .map(|t| &t.subject)
            .collect();
        found.into_iter().cloned().collect()
    }

    /// Objects of triples matching `subject predicate ?`
    #[must_use]
    pub fn objects(&self, subject: &Node, predicate: &Iri) -> Vec<Term> {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| t.object.clone())
            .collect()
    }

    /// Named resources typed as `class`
    #[must_use]
    pub fn instances_of(&self, class: &Iri) -> Vec<Iri> {
        self.subjects(&rdf::type_(), &Term::Iri(class.clone()))
            .into_iter()
            .filter_map(|node| node.as_iri().cloned())
            .collect()
    }

    /// Remove a resource: its statements, the blank nodes it owns,
    /// and every statement pointing at it. Returns the number removed.
    pub fn remove_resource(&mut self, iri: &Iri) -> usize {
        let mut doomed: BTreeSet<Node> = BTreeSet::new();
        let mut frontier = vec![Node::Iri(iri.clone())];

        while let Some(node) = frontier.pop() {
            if !doomed.insert(node.clone()) {
                continue;
            }
            frontier.extend(
                self.triples
                    .iter()
                    .filter(|t| t.subject == node)
                    .filter_map(|t| match &t.object {
                        Term::Blank(label) => Some(Node::Blank(label.clone())),
                        _ => None,
                    }),
            );
        }

        let target = Term::Iri(iri.clone());
        let before = self.triples.len();
        self.triples
            .retain(|t| !doomed.contains(&t.subject) && t.object != target);
        before - self.triples.len()
    }

    /// One statement per line in canonical order
    #[must_use]
    pub fn to_ntriples(&self) -> String {
        self.triples.iter().fold(String::new(), |mut out, t| {
            let _ = writeln!(out, "{t}");
            out
        })
    }

    /// Canonical Turtle: prefixed subject blocks in sorted order,
    /// `rdf:type` leading each block
    #[must_use]
    pub fn to_pretty(&self) -> String {
        turtle::write(self)
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::collections::btree_set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
