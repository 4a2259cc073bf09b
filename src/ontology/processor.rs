//! Ontology processor
//!
//! Walks an ontology and produces the canonical asserted-axiom set: every
//! supported axiom plus synthesized declaration axioms for every entity any
//! included axiom references. Rules are canonicalized and partitioned from
//! SQWRL queries on the way through; every referenced entity is recorded in
//! the entity resolver.
//!
//! `process_ontology` is total: it clears all state, then re-walks. Either
//! it returns with fully populated state, or it raises and leaves the
//! processor empty.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::core::Ontology;
use crate::error::{SqwrlError, SqwrlResult};
use crate::ontology::axiom::{Axiom, AxiomKind};
use crate::ontology::resolver::EntityResolver;
use crate::rule::Rule;
use crate::sqwrl::{self, Query, QueryResult};
use crate::term::{Entity, EntityKind, Iri};

/// Extracts asserted axioms, synthesizes declarations, and partitions rules
/// from queries
#[derive(Default)]
pub struct OntologyProcessor {
    rules: IndexMap<String, Rule>,
    queries: IndexMap<String, Query>,

    asserted_axioms: IndexSet<Axiom>,

    class_declarations: IndexMap<Iri, Axiom>,
    individual_declarations: IndexMap<Iri, Axiom>,
    object_property_declarations: IndexMap<Iri, Axiom>,
    data_property_declarations: IndexMap<Iri, Axiom>,
    annotation_property_declarations: IndexMap<Iri, Axiom>,
    datatype_declarations: IndexMap<Iri, Axiom>,

    resolver: EntityResolver,
}

impl OntologyProcessor {
    /// Create an empty processor
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state and re-walk the ontology
    ///
    /// On error the processor is left empty, equivalent to post-reset.
    pub fn process_ontology(
        &mut self,
        ontology: &dyn Ontology,
        include_imports: bool,
    ) -> SqwrlResult<()> {
        self.reset();

        if let Err(error) = self.process_inner(ontology, include_imports) {
            self.reset();
            return Err(error);
        }

        debug!(
            axioms = self.asserted_axioms.len(),
            rules = self.rules.len(),
            queries = self.queries.len(),
            entities = self.resolver.len(),
            "ontology processed"
        );
        Ok(())
    }

    fn process_inner(
        &mut self,
        ontology: &dyn Ontology,
        include_imports: bool,
    ) -> SqwrlResult<()> {
        self.process_rules_and_queries(ontology)?;
        self.process_axioms(ontology, include_imports);
        Ok(())
    }

    /// Canonicalize each rule axiom and partition rules from queries
    ///
    /// A rule is a query iff its body or head calls a SQWRL built-in. Rules
    /// are axioms and join the asserted set; queries do not.
    fn process_rules_and_queries(&mut self, ontology: &dyn Ontology) -> SqwrlResult<()> {
        for rule in ontology.swrl_rules() {
            let rule = rule.canonicalize();
            if sqwrl::is_sqwrl_query(&rule) {
                for entity in Axiom::Rule(rule.clone()).referenced_entities() {
                    self.resolver.record(entity);
                }
                let query = Query::from_rule(rule)?;
                self.queries.insert(query.name().to_string(), query);
            } else {
                let axiom = Axiom::Rule(rule.clone());
                for entity in axiom.referenced_entities() {
                    self.ensure_declared(entity);
                }
                self.asserted_axioms.insert(axiom);
                self.rules.insert(rule.name().to_string(), rule);
            }
        }
        Ok(())
    }

    /// Walk every supported axiom kind, declarations first
    fn process_axioms(&mut self, ontology: &dyn Ontology, include_imports: bool) {
        for axiom in ontology.axioms_of_kind(AxiomKind::Declaration, include_imports) {
            if let Axiom::Declaration(entity) = &axiom {
                self.declaration_index_mut(entity.kind())
                    .insert(entity.iri().clone(), axiom.clone());
                self.resolver.record(entity.clone());
                self.asserted_axioms.insert(axiom);
            }
        }

        for kind in AxiomKind::ALL {
            if matches!(kind, AxiomKind::Declaration | AxiomKind::Rule) {
                continue;
            }
            for axiom in ontology.axioms_of_kind(*kind, include_imports) {
                for entity in axiom.referenced_entities() {
                    self.ensure_declared(entity);
                }
                self.asserted_axioms.insert(axiom);
            }
        }
    }

    /// Synthesize a declaration for an entity unless one is already indexed
    fn ensure_declared(&mut self, entity: Entity) {
        let index = self.declaration_index_mut(entity.kind());
        if index.contains_key(entity.iri()) {
            return;
        }
        let axiom = Axiom::Declaration(entity.clone());
        index.insert(entity.iri().clone(), axiom.clone());
        self.asserted_axioms.insert(axiom);
        self.resolver.record(entity);
    }

    /// Verify the declaration-closure invariant over the asserted set
    pub fn validate_declaration_closure(&self) -> SqwrlResult<()> {
        for axiom in &self.asserted_axioms {
            for entity in axiom.referenced_entities() {
                if !self
                    .declaration_index(entity.kind())
                    .contains_key(entity.iri())
                {
                    return Err(SqwrlError::rule_engine(format!(
                        "missing declaration for {} referenced by asserted axioms",
                        entity
                    )));
                }
            }
        }
        Ok(())
    }

    /// Clear all indexes, the rule and query maps, and the resolver
    pub fn reset(&mut self) {
        self.rules.clear();
        self.queries.clear();
        self.resolver.reset();

        self.asserted_axioms.clear();

        self.class_declarations.clear();
        self.individual_declarations.clear();
        self.object_property_declarations.clear();
        self.data_property_declarations.clear();
        self.annotation_property_declarations.clear();
        self.datatype_declarations.clear();
    }

    // ========================================================================
    // Read accessors
    // ========================================================================

    /// The asserted axioms, SWRL rules included
    pub fn asserted_axioms(&self) -> &IndexSet<Axiom> {
        &self.asserted_axioms
    }

    pub fn has_asserted_axiom(&self, axiom: &Axiom) -> bool {
        self.asserted_axioms.contains(axiom)
    }

    pub fn number_of_asserted_axioms(&self) -> usize {
        self.asserted_axioms.len()
    }

    /// A rule by name
    pub fn swrl_rule(&self, rule_name: &str) -> SqwrlResult<&Rule> {
        self.rules
            .get(rule_name)
            .ok_or_else(|| SqwrlError::invalid_rule_name(rule_name))
    }

    /// A query by name
    pub fn sqwrl_query(&self, query_name: &str) -> SqwrlResult<&Query> {
        self.queries
            .get(query_name)
            .ok_or_else(|| SqwrlError::invalid_query_name(query_name))
    }

    pub fn is_sqwrl_query(&self, query_name: &str) -> bool {
        self.queries.contains_key(query_name)
    }

    /// The result of a previously executed query
    pub fn sqwrl_result(&self, query_name: &str) -> SqwrlResult<&QueryResult> {
        Ok(self.sqwrl_query(query_name)?.result())
    }

    /// The result generator of a query, for row population
    pub fn sqwrl_result_generator(&mut self, query_name: &str) -> SqwrlResult<&mut QueryResult> {
        self.queries
            .get_mut(query_name)
            .map(Query::result_generator)
            .ok_or_else(|| SqwrlError::invalid_query_name(query_name))
    }

    pub fn swrl_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn sqwrl_queries(&self) -> impl Iterator<Item = &Query> {
        self.queries.values()
    }

    pub fn sqwrl_queries_mut(&mut self) -> impl Iterator<Item = &mut Query> {
        self.queries.values_mut()
    }

    pub fn swrl_rule_names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    pub fn sqwrl_query_names(&self) -> Vec<String> {
        self.queries.keys().cloned().collect()
    }

    pub fn number_of_swrl_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn number_of_sqwrl_queries(&self) -> usize {
        self.queries.len()
    }

    /// Per-kind declaration count
    pub fn number_of_declarations(&self, kind: EntityKind) -> usize {
        self.declaration_index(kind).len()
    }

    /// The entity resolver populated by the last walk
    pub fn resolver(&self) -> &EntityResolver {
        &self.resolver
    }

    fn declaration_index(&self, kind: EntityKind) -> &IndexMap<Iri, Axiom> {
        match kind {
            EntityKind::Class => &self.class_declarations,
            EntityKind::NamedIndividual => &self.individual_declarations,
            EntityKind::ObjectProperty => &self.object_property_declarations,
            EntityKind::DataProperty => &self.data_property_declarations,
            EntityKind::AnnotationProperty => &self.annotation_property_declarations,
            EntityKind::Datatype => &self.datatype_declarations,
        }
    }

    fn declaration_index_mut(&mut self, kind: EntityKind) -> &mut IndexMap<Iri, Axiom> {
        match kind {
            EntityKind::Class => &mut self.class_declarations,
            EntityKind::NamedIndividual => &mut self.individual_declarations,
            EntityKind::ObjectProperty => &mut self.object_property_declarations,
            EntityKind::DataProperty => &mut self.data_property_declarations,
            EntityKind::AnnotationProperty => &mut self.annotation_property_declarations,
            EntityKind::Datatype => &mut self.datatype_declarations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::OntologyStore;
    use crate::rule::{Atom, AtomArgument, BuiltInArgument};
    use crate::sqwrl::names;
    use crate::term::Literal;

    fn iri(local: &str) -> Iri {
        Iri::new(format!("http://example.org#{}", local))
    }

    fn store_with_assertions() -> OntologyStore {
        let mut store = OntologyStore::new();
        store.add(Axiom::ClassAssertion {
            class: iri("Person"),
            individual: iri("fred"),
        });
        store.add(Axiom::ObjectPropertyAssertion {
            property: iri("knows"),
            subject: iri("fred"),
            object: iri("joe"),
        });
        store.add(Axiom::DataPropertyAssertion {
            property: iri("hasAge"),
            subject: iri("fred"),
            value: Literal::int(27),
        });
        store
    }

    #[test]
    fn test_declaration_synthesis() {
        let store = store_with_assertions();
        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();

        // fred, joe, Person, knows, hasAge all get declarations
        assert!(processor.has_asserted_axiom(&Axiom::Declaration(Entity::class(iri("Person")))));
        assert!(processor
            .has_asserted_axiom(&Axiom::Declaration(Entity::named_individual(iri("joe")))));
        assert!(processor
            .has_asserted_axiom(&Axiom::Declaration(Entity::object_property(iri("knows")))));
        assert!(processor
            .has_asserted_axiom(&Axiom::Declaration(Entity::data_property(iri("hasAge")))));
        assert_eq!(processor.number_of_declarations(EntityKind::NamedIndividual), 2);

        // 3 assertions + 5 declarations
        assert_eq!(processor.number_of_asserted_axioms(), 8);
        processor.validate_declaration_closure().unwrap();
    }

    #[test]
    fn test_declaration_synthesis_is_idempotent() {
        let mut store = store_with_assertions();
        // An explicit declaration for an entity the assertions also reference
        store.add(Axiom::Declaration(Entity::class(iri("Person"))));

        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();

        assert_eq!(processor.number_of_declarations(EntityKind::Class), 1);
    }

    #[test]
    fn test_entities_recorded_in_resolver() {
        let store = store_with_assertions();
        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();

        let resolver = processor.resolver();
        assert!(resolver.is_recorded(EntityKind::Class, &iri("Person")));
        assert!(resolver.is_recorded(EntityKind::NamedIndividual, &iri("fred")));
        assert!(resolver.is_recorded(EntityKind::ObjectProperty, &iri("knows")));
    }

    #[test]
    fn test_query_partitioning() {
        let mut store = OntologyStore::new();
        store.add_rule(Rule::new(
            "Q1",
            vec![Atom::class(iri("Person"), AtomArgument::variable("p"))],
            vec![Atom::built_in(
                names::SELECT,
                vec![BuiltInArgument::variable("p")],
            )],
        ));
        store.add_rule(Rule::new(
            "R1",
            vec![Atom::class(iri("Person"), AtomArgument::variable("p"))],
            vec![Atom::class(iri("Agent"), AtomArgument::variable("p"))],
        ));

        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();

        // The query is stored under its name and excluded from the asserted set
        assert!(processor.is_sqwrl_query("Q1"));
        assert_eq!(processor.number_of_sqwrl_queries(), 1);
        assert_eq!(processor.number_of_swrl_rules(), 1);
        assert!(processor.sqwrl_query("Q1").is_ok());
        assert!(processor.swrl_rule("R1").is_ok());

        let asserted_rules: Vec<_> = processor
            .asserted_axioms()
            .iter()
            .filter(|axiom| axiom.kind() == AxiomKind::Rule)
            .collect();
        assert_eq!(asserted_rules.len(), 1);
        assert_eq!(
            asserted_rules[0],
            &Axiom::Rule(Rule::new("R1", vec![], vec![]))
        );
    }

    #[test]
    fn test_rule_entities_are_declared() {
        let mut store = OntologyStore::new();
        store.add_rule(Rule::new(
            "R1",
            vec![Atom::class(iri("Person"), AtomArgument::variable("p"))],
            vec![Atom::class(iri("Agent"), AtomArgument::variable("p"))],
        ));

        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();

        assert!(processor.has_asserted_axiom(&Axiom::Declaration(Entity::class(iri("Person")))));
        assert!(processor.has_asserted_axiom(&Axiom::Declaration(Entity::class(iri("Agent")))));
        processor.validate_declaration_closure().unwrap();
    }

    #[test]
    fn test_rules_are_canonicalized() {
        let mut store = OntologyStore::new();
        store.add_rule(Rule::new(
            "R1",
            vec![
                Atom::built_in(
                    "swrlb:add",
                    vec![
                        BuiltInArgument::variable("z"),
                        BuiltInArgument::variable("x"),
                        BuiltInArgument::variable("y"),
                    ],
                ),
                Atom::class(iri("Person"), AtomArgument::variable("x")),
            ],
            vec![],
        ));

        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();

        let rule = processor.swrl_rule("R1").unwrap();
        assert!(rule.body_atoms()[0].is_class_atom());
        assert!(rule.body_atoms()[1].is_built_in());
    }

    #[test]
    fn test_unknown_names_raise() {
        let processor = OntologyProcessor::new();
        assert_eq!(
            processor.swrl_rule("nope").unwrap_err().code,
            crate::error::ErrorCode::InvalidRuleName
        );
        assert_eq!(
            processor.sqwrl_query("nope").unwrap_err().code,
            crate::error::ErrorCode::InvalidQueryName
        );
        assert_eq!(
            processor.sqwrl_result("nope").unwrap_err().code,
            crate::error::ErrorCode::InvalidQueryName
        );
    }

    #[test]
    fn test_process_clears_previous_state() {
        let store = store_with_assertions();
        let mut processor = OntologyProcessor::new();
        processor.process_ontology(&store, true).unwrap();
        let first_count = processor.number_of_asserted_axioms();

        processor.process_ontology(&store, true).unwrap();
        assert_eq!(processor.number_of_asserted_axioms(), first_count);
    }

    #[test]
    fn test_error_leaves_processor_empty() {
        let mut store = OntologyStore::new();
        // orderBy over a variable that is never selected: query construction fails
        store.add_rule(Rule::new(
            "Bad",
            vec![],
            vec![
                Atom::built_in(names::SELECT, vec![BuiltInArgument::variable("x")]),
                Atom::built_in(names::ORDER_BY, vec![BuiltInArgument::variable("y")]),
            ],
        ));
        store.add(Axiom::ClassAssertion {
            class: iri("Person"),
            individual: iri("fred"),
        });

        let mut processor = OntologyProcessor::new();
        assert!(processor.process_ontology(&store, true).is_err());

        assert_eq!(processor.number_of_asserted_axioms(), 0);
        assert_eq!(processor.number_of_sqwrl_queries(), 0);
        assert!(processor.resolver().is_empty());
    }
}
