//! Entity resolver
//!
//! Records every entity the processor encounters, keyed by IRI under its
//! kind, and answers lookups for target-engine converters. Records are
//! additive within a session and cleared by `reset`.

use indexmap::IndexMap;

use crate::term::{Entity, EntityKind, Iri};

/// Name-to-entity resolver, one index per entity kind
#[derive(Clone, Debug, Default)]
pub struct EntityResolver {
    classes: IndexMap<Iri, Entity>,
    individuals: IndexMap<Iri, Entity>,
    object_properties: IndexMap<Iri, Entity>,
    data_properties: IndexMap<Iri, Entity>,
    annotation_properties: IndexMap<Iri, Entity>,
    datatypes: IndexMap<Iri, Entity>,
}

impl EntityResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entity under its kind
    pub fn record(&mut self, entity: Entity) {
        self.index_mut(entity.kind())
            .insert(entity.iri().clone(), entity);
    }

    /// Look up an entity of a specific kind
    pub fn lookup(&self, kind: EntityKind, iri: &Iri) -> Option<&Entity> {
        self.index(kind).get(iri)
    }

    /// Check whether an entity of the given kind is recorded
    pub fn is_recorded(&self, kind: EntityKind, iri: &Iri) -> bool {
        self.index(kind).contains_key(iri)
    }

    /// Resolve an IRI against all kinds, in declaration-kind order
    pub fn resolve(&self, iri: &Iri) -> Option<&Entity> {
        const KINDS: [EntityKind; 6] = [
            EntityKind::Class,
            EntityKind::NamedIndividual,
            EntityKind::ObjectProperty,
            EntityKind::DataProperty,
            EntityKind::AnnotationProperty,
            EntityKind::Datatype,
        ];
        KINDS.iter().find_map(|kind| self.lookup(*kind, iri))
    }

    /// Number of recorded entities of a kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.index(kind).len()
    }

    /// Total number of recorded entities
    pub fn len(&self) -> usize {
        self.classes.len()
            + self.individuals.len()
            + self.object_properties.len()
            + self.data_properties.len()
            + self.annotation_properties.len()
            + self.datatypes.len()
    }

    /// Check if the resolver is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all recorded entities
    pub fn reset(&mut self) {
        self.classes.clear();
        self.individuals.clear();
        self.object_properties.clear();
        self.data_properties.clear();
        self.annotation_properties.clear();
        self.datatypes.clear();
    }

    fn index(&self, kind: EntityKind) -> &IndexMap<Iri, Entity> {
        match kind {
            EntityKind::Class => &self.classes,
            EntityKind::NamedIndividual => &self.individuals,
            EntityKind::ObjectProperty => &self.object_properties,
            EntityKind::DataProperty => &self.data_properties,
            EntityKind::AnnotationProperty => &self.annotation_properties,
            EntityKind::Datatype => &self.datatypes,
        }
    }

    fn index_mut(&mut self, kind: EntityKind) -> &mut IndexMap<Iri, Entity> {
        match kind {
            EntityKind::Class => &mut self.classes,
            EntityKind::NamedIndividual => &mut self.individuals,
            EntityKind::ObjectProperty => &mut self.object_properties,
            EntityKind::DataProperty => &mut self.data_properties,
            EntityKind::AnnotationProperty => &mut self.annotation_properties,
            EntityKind::Datatype => &mut self.datatypes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let mut resolver = EntityResolver::new();
        let iri = Iri::new("http://a#Person");
        resolver.record(Entity::class(iri.clone()));

        assert!(resolver.is_recorded(EntityKind::Class, &iri));
        assert!(!resolver.is_recorded(EntityKind::NamedIndividual, &iri));
        assert_eq!(
            resolver.lookup(EntityKind::Class, &iri),
            Some(&Entity::class(iri.clone()))
        );
        assert_eq!(resolver.resolve(&iri).unwrap().kind(), EntityKind::Class);
    }

    #[test]
    fn test_record_is_additive_and_idempotent() {
        let mut resolver = EntityResolver::new();
        resolver.record(Entity::class("http://a#C"));
        resolver.record(Entity::class("http://a#C"));
        resolver.record(Entity::object_property("http://a#p"));

        assert_eq!(resolver.count(EntityKind::Class), 1);
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut resolver = EntityResolver::new();
        resolver.record(Entity::datatype("http://a#dt"));
        resolver.reset();
        assert!(resolver.is_empty());
    }
}
