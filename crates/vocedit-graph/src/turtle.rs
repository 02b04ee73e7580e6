//! Turtle reading and canonical writing
//!
//! Reading goes through `sophia_turtle`, so any Turtle 1.1 document
//! (N-Triples included) is accepted. Writing emits one block per subject
//! with the rdf, rdfs and skos prefixes abbreviated.

use crate::error::GraphError;
use crate::graph::Graph;
use crate::iri::Iri;
use crate::namespaces::{rdf, Namespace, RDF, RDFS, SKOS, XSD};
use crate::term::{Literal, Node, Term, Triple};
use sophia_api::source::{StreamError, TripleSource};
use sophia_api::term::{Term as RdfTerm, TermKind};
use sophia_api::triple::Triple as _;
use sophia_turtle::parser::turtle;
use std::collections::BTreeMap;
use std::fmt::Write as _;

const PREFIXES: [(&str, Namespace); 3] = [("rdf", RDF), ("rdfs", RDFS), ("skos", SKOS)];

/// Parse a Turtle document
///
/// # Errors
/// - `GraphError::Parse` if the text is not Turtle or uses quoted triples
/// - `GraphError::InvalidIri` for relative or otherwise unusable IRIs
pub fn parse(text: &str) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    turtle::parse_str(text)
        .try_for_each_triple(|t| -> Result<(), GraphError> {
            graph.insert(Triple {
                subject: to_node(&t.s())?,
                predicate: to_iri(&t.p())?,
                object: to_term(&t.o())?,
            });
            Ok(())
        })
        .map_err(|e| match e {
            StreamError::SourceError(e) => GraphError::Parse(e.to_string()),
            StreamError::SinkError(e) => e,
        })?;
    Ok(graph)
}

fn to_iri<T: RdfTerm>(term: &T) -> Result<Iri, GraphError> {
    match term.iri() {
        Some(value) => Iri::new(value.as_str()),
        None => Err(unsupported(term.kind(), "an IRI")),
    }
}

fn to_node<T: RdfTerm>(term: &T) -> Result<Node, GraphError> {
    match term.kind() {
        TermKind::Iri => to_iri(term).map(Node::Iri),
        TermKind::BlankNode => Ok(Node::Blank(blank_label(term))),
        other => Err(unsupported(other, "a subject")),
    }
}

fn to_term<T: RdfTerm>(term: &T) -> Result<Term, GraphError> {
    match term.kind() {
        TermKind::Iri => to_iri(term).map(Term::Iri),
        TermKind::BlankNode => Ok(Term::Blank(blank_label(term))),
        TermKind::Literal => to_literal(term).map(Term::Literal),
        other => Err(unsupported(other, "an object")),
    }
}

fn blank_label<T: RdfTerm>(term: &T) -> String {
    term.bnode_id()
        .map(|id| id.as_str().to_owned())
        .unwrap_or_default()
}

fn to_literal<T: RdfTerm>(term: &T) -> Result<Literal, GraphError> {
    let value = term
        .lexical_form()
        .map(|lexical| String::from(&*lexical))
        .unwrap_or_default();
    if let Some(tag) = term.language_tag() {
        return Ok(Literal::lang(value, tag.as_str()));
    }

    let mut literal = Literal::plain(value);
    if let Some(datatype) = term.datatype() {
        // xsd:string is the implicit datatype of plain literals
        if datatype.as_str() != XSD.term("string").as_str() {
            literal.datatype = Some(Iri::new(datatype.as_str())?);
        }
    }
    Ok(literal)
}

fn unsupported(kind: TermKind, position: &str) -> GraphError {
    GraphError::Parse(format!("expected {position}, found a {kind:?} term"))
}

/// Canonical Turtle form of `graph`
///
/// Subjects appear in sorted order, each as one block led by its
/// `rdf:type` values; blocks are separated by a blank line.
pub(crate) fn write(graph: &Graph) -> String {
    let type_predicate = rdf::type_();
    let mut blocks: BTreeMap<&Node, BTreeMap<&Iri, Vec<&Term>>> = BTreeMap::new();
    for triple in graph {
        blocks
            .entry(&triple.subject)
            .or_default()
            .entry(&triple.predicate)
            .or_default()
            .push(&triple.object);
    }

    let mut body = String::new();
    let mut used = [false; PREFIXES.len()];
    for (index, (subject, block)) in blocks.iter().enumerate() {
        if index > 0 {
            body.push('\n');
        }
        let _ = writeln!(body, "{}", node_text(subject, &mut used));

        let mut predicates: Vec<_> = block.iter().collect();
        predicates.sort_by_key(|(predicate, _)| ***predicate != type_predicate);
        for (position, (predicate, objects)) in predicates.iter().enumerate() {
            let verb = if ***predicate == type_predicate {
                "a".to_string()
            } else {
                iri_text(predicate, &mut used)
            };
            let objects: Vec<String> = objects
                .iter()
                .map(|object| term_text(object, &mut used))
                .collect();
            let end = if position + 1 == predicates.len() { '.' } else { ';' };
            let _ = writeln!(body, "    {verb} {} {end}", objects.join(", "));
        }
    }

    let mut out = String::new();
    for ((prefix, namespace), _) in PREFIXES.iter().zip(used).filter(|(_, on)| *on) {
        let _ = writeln!(out, "@prefix {prefix}: <{}> .", namespace.base());
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&body);
    out
}

fn iri_text(iri: &Iri, used: &mut [bool; PREFIXES.len()]) -> String {
    for (slot, (prefix, namespace)) in PREFIXES.iter().enumerate() {
        if let Some(local) = iri.as_str().strip_prefix(namespace.base()) {
            if is_local_name(local) {
                used[slot] = true;
                return format!("{prefix}:{local}");
            }
        }
    }
    format!("<{iri}>")
}

fn node_text(node: &Node, used: &mut [bool; PREFIXES.len()]) -> String {
    match node {
        Node::Iri(iri) => iri_text(iri, used),
        Node::Blank(_) => node.to_string(),
    }
}

fn term_text(term: &Term, used: &mut [bool; PREFIXES.len()]) -> String {
    match term {
        Term::Iri(iri) => iri_text(iri, used),
        other => other.to_string(),
    }
}

/// Local names kept to a conservative subset of `PN_LOCAL`
fn is_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
