//! Vocabulary namespaces used by the editor

use crate::iri::Iri;

/// An IRI prefix that mints terms by local name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace(&'static str);

impl Namespace {
    /// Namespace rooted at `base`
    #[must_use]
    pub const fn new(base: &'static str) -> Self {
        Self(base)
    }

    /// Namespace base IRI
    #[must_use]
    pub const fn base(&self) -> &'static str {
        self.0
    }

    /// Mint `base + local`
    #[must_use]
    pub fn term(&self, local: &str) -> Iri {
        Iri::trusted(format!("{}{local}", self.0))
    }
}

/// RDF namespace
pub const RDF: Namespace = Namespace::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#");
/// RDF Schema namespace
pub const RDFS: Namespace = Namespace::new("http://www.w3.org/2000/01/rdf-schema#");
/// SKOS namespace
pub const SKOS: Namespace = Namespace::new("http://www.w3.org/2004/02/skos/core#");
/// XML Schema datatypes
pub const XSD: Namespace = Namespace::new("http://www.w3.org/2001/XMLSchema#");

pub mod rdf {
    //! `rdf:` terms
    use super::RDF;
    use crate::iri::Iri;

    /// `rdf:type`
    #[must_use]
    pub fn type_() -> Iri {
        RDF.term("type")
    }
}

pub mod rdfs {
    //! `rdfs:` terms
    use super::RDFS;
    use crate::iri::Iri;

    /// `rdfs:isDefinedBy`
    #[must_use]
    pub fn is_defined_by() -> Iri {
        RDFS.term("isDefinedBy")
    }
}

pub mod skos {
    //! `skos:` terms
    use super::SKOS;
    use crate::iri::Iri;

    /// `skos:ConceptScheme`
    #[must_use]
    pub fn concept_scheme() -> Iri {
        SKOS.term("ConceptScheme")
    }

    /// `skos:Concept`
    #[must_use]
    pub fn concept() -> Iri {
        SKOS.term("Concept")
    }

    /// `skos:Collection`
    #[must_use]
    pub fn collection() -> Iri {
        SKOS.term("Collection")
    }

    /// `skos:inScheme`
    #[must_use]
    pub fn in_scheme() -> Iri {
        SKOS.term("inScheme")
    }

    /// `skos:prefLabel`
    #[must_use]
    pub fn pref_label() -> Iri {
        SKOS.term("prefLabel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_full_iris() {
        assert_eq!(
            rdf::type_().as_str(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(
            skos::concept_scheme().as_str(),
            "http://www.w3.org/2004/02/skos/core#ConceptScheme"
        );
        assert_eq!(SKOS.base(), "http://www.w3.org/2004/02/skos/core#");
    }
}
