//! IRI identifiers for graph resources

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FORBIDDEN: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

/// An absolute IRI naming a node in the graph
///
/// Validation is intentionally shallow: the value must be non-empty,
/// carry a scheme separator and contain no whitespace or characters
/// that would break N-Triples framing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    /// Validate and wrap an IRI
    ///
    /// # Errors
    /// - `GraphError::InvalidIri` if the value is empty, relative or
    ///   contains whitespace or reserved characters
    pub fn new(value: impl Into<String>) -> Result<Self, GraphError> {
        let value = value.into();
        let reason = if value.is_empty() {
            Some("empty")
        } else if !value.contains(':') {
            Some("missing scheme")
        } else if value.chars().any(char::is_whitespace) {
            Some("contains whitespace")
        } else if value.contains(FORBIDDEN) {
            Some("contains reserved character")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GraphError::InvalidIri { value, reason }),
            None => Ok(Self(value)),
        }
    }

    /// Namespace-built IRIs are known to be valid
    pub(crate) fn trusted(value: String) -> Self {
        Self(value)
    }

    /// Borrow the IRI text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Iri {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Iri {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(value: Iri) -> Self {
        value.0
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_iris() {
        assert!(Iri::new("https://example.org/def/colour").is_ok());
        assert!(Iri::new("urn:graph:data").is_ok());
    }

    #[test]
    fn rejects_malformed_iris() {
        assert!(matches!(
            Iri::new(""),
            Err(GraphError::InvalidIri { reason: "empty", .. })
        ));
        assert!(matches!(
            Iri::new("colour"),
            Err(GraphError::InvalidIri { reason: "missing scheme", .. })
        ));
        assert!(Iri::new("https://example.org/a b").is_err());
        assert!(Iri::new("https://example.org/<a>").is_err());
    }

    #[test]
    fn serde_round_trips_through_string() {
        let iri: Iri = "https://example.org/x".parse().unwrap();
        assert_eq!(String::from(iri.clone()), "https://example.org/x");
        assert_eq!(iri.to_string(), "https://example.org/x");
    }
}
