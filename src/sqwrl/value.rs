//! SQWRL result cell values
//!
//! A result cell holds an individual, a class, a property, or a literal.
//! Cells compare with the literal total order; same-kind entity values
//! compare by IRI. Structural equality (used by distinct and
//! count-distinct) is derived.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{SqwrlError, SqwrlResult};
use crate::term::{Iri, Literal};

/// A value in a SQWRL result cell
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResultValue {
    /// A named individual
    Individual(Iri),
    /// A class
    Class(Iri),
    /// A property (object, data, or annotation)
    Property(Iri),
    /// A literal
    Literal(Literal),
}

impl ResultValue {
    pub fn individual(iri: impl Into<Iri>) -> Self {
        ResultValue::Individual(iri.into())
    }

    pub fn class(iri: impl Into<Iri>) -> Self {
        ResultValue::Class(iri.into())
    }

    pub fn property(iri: impl Into<Iri>) -> Self {
        ResultValue::Property(iri.into())
    }

    pub fn literal(value: Literal) -> Self {
        ResultValue::Literal(value)
    }

    pub fn is_individual(&self) -> bool {
        matches!(self, ResultValue::Individual(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self, ResultValue::Class(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self, ResultValue::Property(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ResultValue::Literal(_))
    }

    /// True when this cell holds a numeric literal
    pub fn is_numeric(&self) -> bool {
        matches!(self, ResultValue::Literal(value) if value.is_numeric())
    }

    /// Get the literal if this cell holds one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            ResultValue::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Get the IRI if this cell holds an entity value
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            ResultValue::Individual(iri)
            | ResultValue::Class(iri)
            | ResultValue::Property(iri) => Some(iri),
            _ => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ResultValue::Individual(_) => "individual",
            ResultValue::Class(_) => "class",
            ResultValue::Property(_) => "property",
            ResultValue::Literal(_) => "literal",
        }
    }

    /// Compare two cells of the same kind
    ///
    /// Entity values compare by IRI; literals by the literal total order.
    /// Comparing across kinds is a literal-type error.
    pub fn compare(&self, other: &ResultValue) -> SqwrlResult<Ordering> {
        match (self, other) {
            (ResultValue::Individual(a), ResultValue::Individual(b))
            | (ResultValue::Class(a), ResultValue::Class(b))
            | (ResultValue::Property(a), ResultValue::Property(b)) => Ok(a.cmp(b)),
            (ResultValue::Literal(a), ResultValue::Literal(b)) => a.compare(b),
            (a, b) => Err(SqwrlError::literal_type(format!(
                "cannot compare {} value {} with {} value {}",
                a.kind_name(),
                a,
                b.kind_name(),
                b
            ))),
        }
    }
}

impl From<Literal> for ResultValue {
    fn from(value: Literal) -> Self {
        ResultValue::Literal(value)
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Individual(iri)
            | ResultValue::Class(iri)
            | ResultValue::Property(iri) => write!(f, "{}", iri),
            ResultValue::Literal(value) => write!(f, "{}", value.to_quoted_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(ResultValue::individual("http://a#fred").is_individual());
        assert!(ResultValue::literal(Literal::int(1)).is_literal());
        assert!(ResultValue::literal(Literal::int(1)).is_numeric());
        assert!(!ResultValue::literal(Literal::string("x")).is_numeric());
        assert!(!ResultValue::class("http://a#C").is_numeric());
    }

    #[test]
    fn test_same_kind_compare() {
        let a = ResultValue::individual("http://a#a");
        let b = ResultValue::individual("http://a#b");
        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);

        let one = ResultValue::literal(Literal::int(1));
        let two = ResultValue::literal(Literal::double(2.0));
        assert_eq!(one.compare(&two).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_cross_kind_compare_fails() {
        let individual = ResultValue::individual("http://a#a");
        let literal = ResultValue::literal(Literal::int(1));
        let err = individual.compare(&literal).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::LiteralType);
    }
}
