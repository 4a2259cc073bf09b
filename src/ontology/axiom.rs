//! Asserted OWL axioms
//!
//! The axiom enum covers every axiom kind the engine extracts from an
//! ontology, plus SWRL rules (a rule is itself an axiom; a SQWRL query is
//! not). `referenced_entities` drives declaration synthesis: for every
//! entity an axiom mentions, the processor guarantees a matching
//! declaration axiom in the asserted set.

use crate::rule::{Atom, AtomArgument, BuiltInArgument, Rule};
use crate::term::{Entity, Iri, Literal};

/// The kind tag of an axiom, used for per-kind ontology walks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxiomKind {
    Declaration,
    ClassAssertion,
    ObjectPropertyAssertion,
    DataPropertyAssertion,
    SameIndividual,
    DifferentIndividuals,
    SubClassOf,
    EquivalentClasses,
    SubObjectPropertyOf,
    EquivalentObjectProperties,
    DisjointObjectProperties,
    SubDataPropertyOf,
    EquivalentDataProperties,
    DisjointDataProperties,
    TransitiveObjectProperty,
    SymmetricObjectProperty,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    InverseObjectProperties,
    IrreflexiveObjectProperty,
    AsymmetricObjectProperty,
    FunctionalDataProperty,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    DataPropertyDomain,
    DataPropertyRange,
    Rule,
}

impl AxiomKind {
    /// Every supported kind, in processing order (declarations first)
    pub const ALL: &'static [AxiomKind] = &[
        AxiomKind::Declaration,
        AxiomKind::ClassAssertion,
        AxiomKind::ObjectPropertyAssertion,
        AxiomKind::DataPropertyAssertion,
        AxiomKind::SameIndividual,
        AxiomKind::DifferentIndividuals,
        AxiomKind::SubClassOf,
        AxiomKind::EquivalentClasses,
        AxiomKind::SubObjectPropertyOf,
        AxiomKind::EquivalentObjectProperties,
        AxiomKind::DisjointObjectProperties,
        AxiomKind::SubDataPropertyOf,
        AxiomKind::EquivalentDataProperties,
        AxiomKind::DisjointDataProperties,
        AxiomKind::TransitiveObjectProperty,
        AxiomKind::SymmetricObjectProperty,
        AxiomKind::FunctionalObjectProperty,
        AxiomKind::InverseFunctionalObjectProperty,
        AxiomKind::InverseObjectProperties,
        AxiomKind::IrreflexiveObjectProperty,
        AxiomKind::AsymmetricObjectProperty,
        AxiomKind::FunctionalDataProperty,
        AxiomKind::ObjectPropertyDomain,
        AxiomKind::ObjectPropertyRange,
        AxiomKind::DataPropertyDomain,
        AxiomKind::DataPropertyRange,
        AxiomKind::Rule,
    ];
}

/// An asserted OWL axiom
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// Declares the existence and kind of an entity
    Declaration(Entity),
    ClassAssertion {
        class: Iri,
        individual: Iri,
    },
    ObjectPropertyAssertion {
        property: Iri,
        subject: Iri,
        object: Iri,
    },
    DataPropertyAssertion {
        property: Iri,
        subject: Iri,
        value: Literal,
    },
    SameIndividual(Vec<Iri>),
    DifferentIndividuals(Vec<Iri>),
    SubClassOf {
        sub: Iri,
        sup: Iri,
    },
    EquivalentClasses(Vec<Iri>),
    SubObjectPropertyOf {
        sub: Iri,
        sup: Iri,
    },
    EquivalentObjectProperties(Vec<Iri>),
    DisjointObjectProperties(Vec<Iri>),
    SubDataPropertyOf {
        sub: Iri,
        sup: Iri,
    },
    EquivalentDataProperties(Vec<Iri>),
    DisjointDataProperties(Vec<Iri>),
    TransitiveObjectProperty(Iri),
    SymmetricObjectProperty(Iri),
    FunctionalObjectProperty(Iri),
    InverseFunctionalObjectProperty(Iri),
    InverseObjectProperties {
        first: Iri,
        second: Iri,
    },
    IrreflexiveObjectProperty(Iri),
    AsymmetricObjectProperty(Iri),
    FunctionalDataProperty(Iri),
    ObjectPropertyDomain {
        property: Iri,
        domain: Iri,
    },
    ObjectPropertyRange {
        property: Iri,
        range: Iri,
    },
    DataPropertyDomain {
        property: Iri,
        domain: Iri,
    },
    /// The range is a datatype IRI
    DataPropertyRange {
        property: Iri,
        range: Iri,
    },
    /// A SWRL rule asserted in the ontology
    Rule(Rule),
}

impl Axiom {
    /// The kind tag of this axiom
    pub fn kind(&self) -> AxiomKind {
        match self {
            Axiom::Declaration(_) => AxiomKind::Declaration,
            Axiom::ClassAssertion { .. } => AxiomKind::ClassAssertion,
            Axiom::ObjectPropertyAssertion { .. } => AxiomKind::ObjectPropertyAssertion,
            Axiom::DataPropertyAssertion { .. } => AxiomKind::DataPropertyAssertion,
            Axiom::SameIndividual(_) => AxiomKind::SameIndividual,
            Axiom::DifferentIndividuals(_) => AxiomKind::DifferentIndividuals,
            Axiom::SubClassOf { .. } => AxiomKind::SubClassOf,
            Axiom::EquivalentClasses(_) => AxiomKind::EquivalentClasses,
            Axiom::SubObjectPropertyOf { .. } => AxiomKind::SubObjectPropertyOf,
            Axiom::EquivalentObjectProperties(_) => AxiomKind::EquivalentObjectProperties,
            Axiom::DisjointObjectProperties(_) => AxiomKind::DisjointObjectProperties,
            Axiom::SubDataPropertyOf { .. } => AxiomKind::SubDataPropertyOf,
            Axiom::EquivalentDataProperties(_) => AxiomKind::EquivalentDataProperties,
            Axiom::DisjointDataProperties(_) => AxiomKind::DisjointDataProperties,
            Axiom::TransitiveObjectProperty(_) => AxiomKind::TransitiveObjectProperty,
            Axiom::SymmetricObjectProperty(_) => AxiomKind::SymmetricObjectProperty,
            Axiom::FunctionalObjectProperty(_) => AxiomKind::FunctionalObjectProperty,
            Axiom::InverseFunctionalObjectProperty(_) => {
                AxiomKind::InverseFunctionalObjectProperty
            }
            Axiom::InverseObjectProperties { .. } => AxiomKind::InverseObjectProperties,
            Axiom::IrreflexiveObjectProperty(_) => AxiomKind::IrreflexiveObjectProperty,
            Axiom::AsymmetricObjectProperty(_) => AxiomKind::AsymmetricObjectProperty,
            Axiom::FunctionalDataProperty(_) => AxiomKind::FunctionalDataProperty,
            Axiom::ObjectPropertyDomain { .. } => AxiomKind::ObjectPropertyDomain,
            Axiom::ObjectPropertyRange { .. } => AxiomKind::ObjectPropertyRange,
            Axiom::DataPropertyDomain { .. } => AxiomKind::DataPropertyDomain,
            Axiom::DataPropertyRange { .. } => AxiomKind::DataPropertyRange,
            Axiom::Rule(_) => AxiomKind::Rule,
        }
    }

    /// Every entity this axiom references, with its kind
    pub fn referenced_entities(&self) -> Vec<Entity> {
        match self {
            Axiom::Declaration(entity) => vec![entity.clone()],
            Axiom::ClassAssertion { class, individual } => vec![
                Entity::class(class.clone()),
                Entity::named_individual(individual.clone()),
            ],
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => vec![
                Entity::object_property(property.clone()),
                Entity::named_individual(subject.clone()),
                Entity::named_individual(object.clone()),
            ],
            Axiom::DataPropertyAssertion {
                property, subject, ..
            } => vec![
                Entity::data_property(property.clone()),
                Entity::named_individual(subject.clone()),
            ],
            Axiom::SameIndividual(individuals) | Axiom::DifferentIndividuals(individuals) => {
                individuals
                    .iter()
                    .cloned()
                    .map(Entity::named_individual)
                    .collect()
            }
            Axiom::SubClassOf { sub, sup } => {
                vec![Entity::class(sub.clone()), Entity::class(sup.clone())]
            }
            Axiom::EquivalentClasses(classes) => {
                classes.iter().cloned().map(Entity::class).collect()
            }
            Axiom::SubObjectPropertyOf { sub, sup } => vec![
                Entity::object_property(sub.clone()),
                Entity::object_property(sup.clone()),
            ],
            Axiom::EquivalentObjectProperties(properties)
            | Axiom::DisjointObjectProperties(properties) => properties
                .iter()
                .cloned()
                .map(Entity::object_property)
                .collect(),
            Axiom::SubDataPropertyOf { sub, sup } => vec![
                Entity::data_property(sub.clone()),
                Entity::data_property(sup.clone()),
            ],
            Axiom::EquivalentDataProperties(properties)
            | Axiom::DisjointDataProperties(properties) => properties
                .iter()
                .cloned()
                .map(Entity::data_property)
                .collect(),
            Axiom::TransitiveObjectProperty(property)
            | Axiom::SymmetricObjectProperty(property)
            | Axiom::FunctionalObjectProperty(property)
            | Axiom::InverseFunctionalObjectProperty(property)
            | Axiom::IrreflexiveObjectProperty(property)
            | Axiom::AsymmetricObjectProperty(property) => {
                vec![Entity::object_property(property.clone())]
            }
            Axiom::InverseObjectProperties { first, second } => vec![
                Entity::object_property(first.clone()),
                Entity::object_property(second.clone()),
            ],
            Axiom::FunctionalDataProperty(property) => {
                vec![Entity::data_property(property.clone())]
            }
            Axiom::ObjectPropertyDomain { property, domain } => vec![
                Entity::object_property(property.clone()),
                Entity::class(domain.clone()),
            ],
            Axiom::ObjectPropertyRange { property, range } => vec![
                Entity::object_property(property.clone()),
                Entity::class(range.clone()),
            ],
            Axiom::DataPropertyDomain { property, domain } => vec![
                Entity::data_property(property.clone()),
                Entity::class(domain.clone()),
            ],
            Axiom::DataPropertyRange { property, range } => vec![
                Entity::data_property(property.clone()),
                Entity::datatype(range.clone()),
            ],
            Axiom::Rule(rule) => rule_referenced_entities(rule),
        }
    }
}

/// Entities referenced from a rule's atoms and built-in arguments
fn rule_referenced_entities(rule: &Rule) -> Vec<Entity> {
    let mut entities = Vec::new();
    for atom in rule.body_atoms().iter().chain(rule.head_atoms()) {
        atom_referenced_entities(atom, &mut entities);
    }
    entities
}

fn atom_referenced_entities(atom: &Atom, entities: &mut Vec<Entity>) {
    match atom {
        Atom::Class(class_atom) => {
            entities.push(Entity::class(class_atom.class().clone()));
            push_individual(class_atom.argument(), entities);
        }
        Atom::ObjectProperty(property_atom) => {
            entities.push(Entity::object_property(property_atom.property().clone()));
            push_individual(property_atom.subject(), entities);
            push_individual(property_atom.object(), entities);
        }
        Atom::DataProperty(property_atom) => {
            entities.push(Entity::data_property(property_atom.property().clone()));
            push_individual(property_atom.subject(), entities);
        }
        Atom::SameIndividual(individuals) | Atom::DifferentIndividuals(individuals) => {
            push_individual(individuals.first(), entities);
            push_individual(individuals.second(), entities);
        }
        Atom::BuiltIn(built_in) => {
            for argument in built_in.arguments() {
                built_in_argument_entities(argument, entities);
            }
        }
    }
}

fn push_individual(argument: &AtomArgument, entities: &mut Vec<Entity>) {
    if let AtomArgument::Individual(iri) = argument {
        entities.push(Entity::named_individual(iri.clone()));
    }
}

fn built_in_argument_entities(argument: &BuiltInArgument, entities: &mut Vec<Entity>) {
    match argument {
        BuiltInArgument::Class(iri) => entities.push(Entity::class(iri.clone())),
        BuiltInArgument::Individual(iri) => entities.push(Entity::named_individual(iri.clone())),
        BuiltInArgument::ObjectProperty(iri) => {
            entities.push(Entity::object_property(iri.clone()))
        }
        BuiltInArgument::DataProperty(iri) => entities.push(Entity::data_property(iri.clone())),
        BuiltInArgument::AnnotationProperty(iri) => {
            entities.push(Entity::annotation_property(iri.clone()))
        }
        BuiltInArgument::Datatype(iri) => entities.push(Entity::datatype(iri.clone())),
        BuiltInArgument::MultiValue(arguments) => {
            for nested in arguments {
                built_in_argument_entities(nested, entities);
            }
        }
        BuiltInArgument::Variable { .. }
        | BuiltInArgument::Literal(_)
        | BuiltInArgument::Collection(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::AtomArgument;
    use crate::term::EntityKind;

    #[test]
    fn test_kind_tags() {
        let axiom = Axiom::ClassAssertion {
            class: Iri::new("http://a#Person"),
            individual: Iri::new("http://a#fred"),
        };
        assert_eq!(axiom.kind(), AxiomKind::ClassAssertion);
        assert_eq!(AxiomKind::ALL.len(), 27);
    }

    #[test]
    fn test_class_assertion_references() {
        let axiom = Axiom::ClassAssertion {
            class: Iri::new("http://a#Person"),
            individual: Iri::new("http://a#fred"),
        };
        let entities = axiom.referenced_entities();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].kind(), EntityKind::Class);
        assert_eq!(entities[1].kind(), EntityKind::NamedIndividual);
    }

    #[test]
    fn test_data_property_range_references_datatype() {
        let axiom = Axiom::DataPropertyRange {
            property: Iri::new("http://a#hasAge"),
            range: Iri::new("http://www.w3.org/2001/XMLSchema#int"),
        };
        let entities = axiom.referenced_entities();
        assert_eq!(entities[1].kind(), EntityKind::Datatype);
    }

    #[test]
    fn test_rule_axiom_references() {
        let rule = Rule::new(
            "R1",
            vec![Atom::class(
                "http://a#Person",
                AtomArgument::individual("http://a#fred"),
            )],
            vec![Atom::object_property(
                "http://a#knows",
                AtomArgument::variable("x"),
                AtomArgument::variable("y"),
            )],
        );
        let entities = Axiom::Rule(rule).referenced_entities();
        assert!(entities.contains(&Entity::class("http://a#Person")));
        assert!(entities.contains(&Entity::named_individual("http://a#fred")));
        assert!(entities.contains(&Entity::object_property("http://a#knows")));
    }

    #[test]
    fn test_axiom_equality_dedups() {
        use indexmap::IndexSet;
        let mut set = IndexSet::new();
        let declaration = Axiom::Declaration(Entity::class("http://a#C"));
        set.insert(declaration.clone());
        set.insert(declaration);
        assert_eq!(set.len(), 1);
    }
}
