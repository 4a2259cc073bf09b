//! OWL entity and literal value model
//!
//! This module defines the value types the engine is built on:
//! - IRIs (resource identifiers)
//! - Entities (classes, individuals, properties, datatypes)
//! - Typed literals with XSD datatypes
//!
//! Entities and literals are value objects: cheap to copy, immutable after
//! construction, equal by content.

use std::fmt;

pub mod iri;
mod literal;

pub use iri::Iri;
pub use literal::{Literal, XsdDatatype, XsdDuration};

/// The kind of a named OWL entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Class,
    NamedIndividual,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    Datatype,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Class => "Class",
            EntityKind::NamedIndividual => "NamedIndividual",
            EntityKind::ObjectProperty => "ObjectProperty",
            EntityKind::DataProperty => "DataProperty",
            EntityKind::AnnotationProperty => "AnnotationProperty",
            EntityKind::Datatype => "Datatype",
        };
        write!(f, "{}", name)
    }
}

/// A named OWL entity: a kind plus an IRI
///
/// Equality is by kind and IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    kind: EntityKind,
    iri: Iri,
}

impl Entity {
    /// Create an entity of the given kind
    pub fn new(kind: EntityKind, iri: impl Into<Iri>) -> Self {
        Entity {
            kind,
            iri: iri.into(),
        }
    }

    /// Create a class entity
    pub fn class(iri: impl Into<Iri>) -> Self {
        Entity::new(EntityKind::Class, iri)
    }

    /// Create a named individual entity
    pub fn named_individual(iri: impl Into<Iri>) -> Self {
        Entity::new(EntityKind::NamedIndividual, iri)
    }

    /// Create an object property entity
    pub fn object_property(iri: impl Into<Iri>) -> Self {
        Entity::new(EntityKind::ObjectProperty, iri)
    }

    /// Create a data property entity
    pub fn data_property(iri: impl Into<Iri>) -> Self {
        Entity::new(EntityKind::DataProperty, iri)
    }

    /// Create an annotation property entity
    pub fn annotation_property(iri: impl Into<Iri>) -> Self {
        Entity::new(EntityKind::AnnotationProperty, iri)
    }

    /// Create a datatype entity
    pub fn datatype(iri: impl Into<Iri>) -> Self {
        Entity::new(EntityKind::Datatype, iri)
    }

    /// Get the entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Get the entity IRI
    pub fn iri(&self) -> &Iri {
        &self.iri
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.iri)
    }
}
