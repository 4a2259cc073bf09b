//! IRI (resource identifier) representation

use std::fmt;

/// A globally unique resource identifier
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Create a new IRI
    pub fn new(value: impl Into<String>) -> Self {
        Iri {
            value: value.into(),
        }
    }

    /// Get the IRI as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get the local name (fragment or last path segment)
    pub fn local_name(&self) -> &str {
        if let Some(pos) = self.value.rfind('#') {
            &self.value[pos + 1..]
        } else if let Some(pos) = self.value.rfind('/') {
            &self.value[pos + 1..]
        } else {
            &self.value
        }
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.value)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.value)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        let iri = Iri::new("http://example.org/onto#Person");
        assert_eq!(iri.local_name(), "Person");

        let iri2 = Iri::new("http://example.org/path/name");
        assert_eq!(iri2.local_name(), "name");

        let bare = Iri::new("Person");
        assert_eq!(bare.local_name(), "Person");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Iri::from("http://a#x"), Iri::new("http://a#x"));
        assert_ne!(Iri::from("http://a#x"), Iri::new("http://a#y"));
    }
}
