//! Built-in atom arguments
//!
//! A built-in argument is a tagged variant over the things a built-in call
//! can mention: a variable (possibly unbound), a literal, a named entity of
//! some kind, a multi-value list, or a SQWRL collection reference. Arguments
//! are read-only after construction except for `set_unbound`.

use std::fmt;

use crate::term::{Entity, EntityKind, Iri, Literal};

/// A reference to a SQWRL collection (set or bag) built by a query
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionRef {
    query_name: String,
    collection_name: String,
    group_id: String,
}

impl CollectionRef {
    pub fn new(
        query_name: impl Into<String>,
        collection_name: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        CollectionRef {
            query_name: query_name.into(),
            collection_name: collection_name.into(),
            group_id: group_id.into(),
        }
    }

    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

/// An argument to a built-in atom
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltInArgument {
    /// A variable; `unbound` means the built-in itself must produce the value
    Variable { name: String, unbound: bool },
    /// A literal value
    Literal(Literal),
    /// A class reference
    Class(Iri),
    /// A named individual reference
    Individual(Iri),
    /// An object property reference
    ObjectProperty(Iri),
    /// A data property reference
    DataProperty(Iri),
    /// An annotation property reference
    AnnotationProperty(Iri),
    /// A datatype reference
    Datatype(Iri),
    /// An ordered list of arguments
    MultiValue(Vec<BuiltInArgument>),
    /// A SQWRL collection reference
    Collection(CollectionRef),
}

impl BuiltInArgument {
    /// Create a (bound) variable argument
    pub fn variable(name: impl Into<String>) -> Self {
        BuiltInArgument::Variable {
            name: name.into(),
            unbound: false,
        }
    }

    /// Create a variable argument flagged unbound
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        BuiltInArgument::Variable {
            name: name.into(),
            unbound: true,
        }
    }

    /// Create a literal argument
    pub fn literal(value: Literal) -> Self {
        BuiltInArgument::Literal(value)
    }

    /// Create a class argument
    pub fn class(iri: impl Into<Iri>) -> Self {
        BuiltInArgument::Class(iri.into())
    }

    /// Create a named individual argument
    pub fn individual(iri: impl Into<Iri>) -> Self {
        BuiltInArgument::Individual(iri.into())
    }

    /// Create an object property argument
    pub fn object_property(iri: impl Into<Iri>) -> Self {
        BuiltInArgument::ObjectProperty(iri.into())
    }

    /// Create a data property argument
    pub fn data_property(iri: impl Into<Iri>) -> Self {
        BuiltInArgument::DataProperty(iri.into())
    }

    /// Create an annotation property argument
    pub fn annotation_property(iri: impl Into<Iri>) -> Self {
        BuiltInArgument::AnnotationProperty(iri.into())
    }

    /// Create a datatype argument
    pub fn datatype(iri: impl Into<Iri>) -> Self {
        BuiltInArgument::Datatype(iri.into())
    }

    /// Create the argument variant matching a prepared entity
    pub fn entity(entity: &Entity) -> Self {
        let iri = entity.iri().clone();
        match entity.kind() {
            EntityKind::Class => BuiltInArgument::Class(iri),
            EntityKind::NamedIndividual => BuiltInArgument::Individual(iri),
            EntityKind::ObjectProperty => BuiltInArgument::ObjectProperty(iri),
            EntityKind::DataProperty => BuiltInArgument::DataProperty(iri),
            EntityKind::AnnotationProperty => BuiltInArgument::AnnotationProperty(iri),
            EntityKind::Datatype => BuiltInArgument::Datatype(iri),
        }
    }

    /// Create a multi-value argument
    pub fn multi_value(arguments: Vec<BuiltInArgument>) -> Self {
        BuiltInArgument::MultiValue(arguments)
    }

    /// Create a SQWRL collection argument
    pub fn collection(
        query_name: impl Into<String>,
        collection_name: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        BuiltInArgument::Collection(CollectionRef::new(query_name, collection_name, group_id))
    }

    /// Check if this argument is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, BuiltInArgument::Variable { .. })
    }

    /// Get the variable name if this argument is a variable
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            BuiltInArgument::Variable { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this argument is an unbound variable
    ///
    /// Only meaningful for variables; false for every other variant.
    pub fn is_unbound(&self) -> bool {
        matches!(self, BuiltInArgument::Variable { unbound: true, .. })
    }

    /// Flag a variable argument as unbound; idempotent, ignored for
    /// non-variable arguments
    pub fn set_unbound(&mut self) {
        if let BuiltInArgument::Variable { unbound, .. } = self {
            *unbound = true;
        }
    }

    /// Get the literal if this argument is a literal
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            BuiltInArgument::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for BuiltInArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltInArgument::Variable { name, .. } => write!(f, "?{}", name),
            BuiltInArgument::Literal(value) => write!(f, "{}", value.to_quoted_string()),
            BuiltInArgument::Class(iri)
            | BuiltInArgument::Individual(iri)
            | BuiltInArgument::ObjectProperty(iri)
            | BuiltInArgument::DataProperty(iri)
            | BuiltInArgument::AnnotationProperty(iri)
            | BuiltInArgument::Datatype(iri) => write!(f, "{}", iri),
            BuiltInArgument::MultiValue(arguments) => {
                write!(f, "(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            BuiltInArgument::Collection(collection) => write!(
                f,
                "{}:{}@{}",
                collection.query_name(),
                collection.collection_name(),
                collection.group_id()
            ),
        }
    }
}
