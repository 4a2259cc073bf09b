//! Rule atoms
//!
//! Atoms are the building blocks of rule bodies and heads. Each kind is a
//! tagged variant; the shared concern (which variables an atom mentions) is
//! exposed through `referenced_variable_names`.

use std::fmt;

use fnv::FnvHashSet;

use crate::rule::argument::BuiltInArgument;
use crate::term::{Iri, Literal};

/// An argument of a non-built-in atom
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AtomArgument {
    /// A variable reference
    Variable(String),
    /// A named individual
    Individual(Iri),
    /// A literal value (data property objects)
    Literal(Literal),
}

impl AtomArgument {
    pub fn variable(name: impl Into<String>) -> Self {
        AtomArgument::Variable(name.into())
    }

    pub fn individual(iri: impl Into<Iri>) -> Self {
        AtomArgument::Individual(iri.into())
    }

    pub fn literal(value: Literal) -> Self {
        AtomArgument::Literal(value)
    }

    pub fn variable_name(&self) -> Option<&str> {
        match self {
            AtomArgument::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for AtomArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomArgument::Variable(name) => write!(f, "?{}", name),
            AtomArgument::Individual(iri) => write!(f, "{}", iri),
            AtomArgument::Literal(value) => write!(f, "{}", value.to_quoted_string()),
        }
    }
}

/// A class membership atom: `Person(?x)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassAtom {
    pub(crate) class: Iri,
    pub(crate) argument: AtomArgument,
}

impl ClassAtom {
    pub fn class(&self) -> &Iri {
        &self.class
    }

    pub fn argument(&self) -> &AtomArgument {
        &self.argument
    }
}

/// An object property atom: `hasParent(?x, ?y)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectPropertyAtom {
    pub(crate) property: Iri,
    pub(crate) subject: AtomArgument,
    pub(crate) object: AtomArgument,
}

impl ObjectPropertyAtom {
    pub fn property(&self) -> &Iri {
        &self.property
    }

    pub fn subject(&self) -> &AtomArgument {
        &self.subject
    }

    pub fn object(&self) -> &AtomArgument {
        &self.object
    }
}

/// A data property atom: `hasAge(?x, ?age)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataPropertyAtom {
    pub(crate) property: Iri,
    pub(crate) subject: AtomArgument,
    pub(crate) value: AtomArgument,
}

impl DataPropertyAtom {
    pub fn property(&self) -> &Iri {
        &self.property
    }

    pub fn subject(&self) -> &AtomArgument {
        &self.subject
    }

    pub fn value(&self) -> &AtomArgument {
        &self.value
    }
}

/// The shared shape of same-individual and different-individuals atoms
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndividualsAtom {
    pub(crate) first: AtomArgument,
    pub(crate) second: AtomArgument,
}

impl IndividualsAtom {
    pub fn first(&self) -> &AtomArgument {
        &self.first
    }

    pub fn second(&self) -> &AtomArgument {
        &self.second
    }
}

/// A built-in call: `swrlb:add(?z, ?x, ?y)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuiltInAtom {
    pub(crate) name: String,
    pub(crate) arguments: Vec<BuiltInArgument>,
}

impl BuiltInAtom {
    /// The prefixed built-in name (e.g. `swrlb:add`, `sqwrl:select`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[BuiltInArgument] {
        &self.arguments
    }
}

/// An atom in a rule body or head
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Atom {
    Class(ClassAtom),
    ObjectProperty(ObjectPropertyAtom),
    DataProperty(DataPropertyAtom),
    SameIndividual(IndividualsAtom),
    DifferentIndividuals(IndividualsAtom),
    BuiltIn(BuiltInAtom),
}

impl Atom {
    /// Create a class atom
    pub fn class(class: impl Into<Iri>, argument: AtomArgument) -> Self {
        Atom::Class(ClassAtom {
            class: class.into(),
            argument,
        })
    }

    /// Create an object property atom
    pub fn object_property(
        property: impl Into<Iri>,
        subject: AtomArgument,
        object: AtomArgument,
    ) -> Self {
        Atom::ObjectProperty(ObjectPropertyAtom {
            property: property.into(),
            subject,
            object,
        })
    }

    /// Create a data property atom
    pub fn data_property(
        property: impl Into<Iri>,
        subject: AtomArgument,
        value: AtomArgument,
    ) -> Self {
        Atom::DataProperty(DataPropertyAtom {
            property: property.into(),
            subject,
            value,
        })
    }

    /// Create a same-individual atom
    pub fn same_individual(first: AtomArgument, second: AtomArgument) -> Self {
        Atom::SameIndividual(IndividualsAtom { first, second })
    }

    /// Create a different-individuals atom
    pub fn different_individuals(first: AtomArgument, second: AtomArgument) -> Self {
        Atom::DifferentIndividuals(IndividualsAtom { first, second })
    }

    /// Create a built-in atom from its prefixed name and arguments
    pub fn built_in(name: impl Into<String>, arguments: Vec<BuiltInArgument>) -> Self {
        Atom::BuiltIn(BuiltInAtom {
            name: name.into(),
            arguments,
        })
    }

    /// Check if this atom is a built-in call
    pub fn is_built_in(&self) -> bool {
        matches!(self, Atom::BuiltIn(_))
    }

    /// Check if this atom is a class atom
    pub fn is_class_atom(&self) -> bool {
        matches!(self, Atom::Class(_))
    }

    /// Get the built-in atom if this is one
    pub fn as_built_in(&self) -> Option<&BuiltInAtom> {
        match self {
            Atom::BuiltIn(built_in) => Some(built_in),
            _ => None,
        }
    }

    /// Names of all variables this atom references
    pub fn referenced_variable_names(&self) -> FnvHashSet<String> {
        let mut names = FnvHashSet::default();

        match self {
            Atom::Class(atom) => insert_variable(&atom.argument, &mut names),
            Atom::ObjectProperty(atom) => {
                insert_variable(&atom.subject, &mut names);
                insert_variable(&atom.object, &mut names);
            }
            Atom::DataProperty(atom) => {
                insert_variable(&atom.subject, &mut names);
                insert_variable(&atom.value, &mut names);
            }
            Atom::SameIndividual(atom) | Atom::DifferentIndividuals(atom) => {
                insert_variable(&atom.first, &mut names);
                insert_variable(&atom.second, &mut names);
            }
            Atom::BuiltIn(atom) => {
                for argument in &atom.arguments {
                    if let Some(name) = argument.variable_name() {
                        names.insert(name.to_string());
                    }
                }
            }
        }

        names
    }
}

fn insert_variable(argument: &AtomArgument, names: &mut FnvHashSet<String>) {
    if let Some(name) = argument.variable_name() {
        names.insert(name.to_string());
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Class(atom) => write!(f, "{}({})", atom.class.local_name(), atom.argument),
            Atom::ObjectProperty(atom) => write!(
                f,
                "{}({}, {})",
                atom.property.local_name(),
                atom.subject,
                atom.object
            ),
            Atom::DataProperty(atom) => write!(
                f,
                "{}({}, {})",
                atom.property.local_name(),
                atom.subject,
                atom.value
            ),
            Atom::SameIndividual(atom) => {
                write!(f, "sameAs({}, {})", atom.first, atom.second)
            }
            Atom::DifferentIndividuals(atom) => {
                write!(f, "differentFrom({}, {})", atom.first, atom.second)
            }
            Atom::BuiltIn(atom) => {
                write!(f, "{}(", atom.name)?;
                for (i, argument) in atom.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}
