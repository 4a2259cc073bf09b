//! Ontology model: axioms, the in-memory store, the processor, and the
//! entity resolver
//!
//! The store holds asserted axioms and rules and implements the [`Ontology`]
//! trait the processor walks. The processor produces the canonical asserted
//! axiom set (with synthesized declarations) and partitions rules from
//! SQWRL queries.

pub mod axiom;
pub mod processor;
pub mod resolver;

pub use axiom::{Axiom, AxiomKind};
pub use processor::OntologyProcessor;
pub use resolver::EntityResolver;

use indexmap::IndexSet;

use crate::core::Ontology;
use crate::rule::Rule;

/// An in-memory ontology: a deduplicated axiom set plus a rule list
#[derive(Clone, Default)]
pub struct OntologyStore {
    axioms: IndexSet<Axiom>,
    rules: Vec<Rule>,
    bulk_conversion_depth: usize,
}

impl OntologyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axiom, ignoring exact duplicates
    ///
    /// Rule axioms are routed into the rule list, where the processor's
    /// rule walk reads them; every other kind joins the axiom set.
    pub fn add(&mut self, axiom: Axiom) {
        if let Axiom::Rule(rule) = axiom {
            self.rules.push(rule);
        } else {
            self.axioms.insert(axiom);
        }
    }

    /// Add a rule axiom
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Check if the store contains an axiom
    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    /// Get the number of axioms
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty() && self.rules.is_empty()
    }

    /// Whether a bulk conversion is in progress
    pub fn in_bulk_conversion(&self) -> bool {
        self.bulk_conversion_depth > 0
    }
}

impl Ontology for OntologyStore {
    // The in-memory store has no imports; the flag only matters for backing
    // ontology libraries that distinguish local and imported axioms.
    fn axioms_of_kind(&self, kind: AxiomKind, _include_imports: bool) -> Vec<Axiom> {
        self.axioms
            .iter()
            .filter(|axiom| axiom.kind() == kind)
            .cloned()
            .collect()
    }

    fn swrl_rules(&self) -> Vec<Rule> {
        self.rules.clone()
    }

    fn add_axiom(&mut self, axiom: Axiom) {
        self.add(axiom);
    }

    fn start_bulk_conversion(&mut self) {
        self.bulk_conversion_depth += 1;
    }

    fn complete_bulk_conversion(&mut self) {
        self.bulk_conversion_depth = self.bulk_conversion_depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Entity, Iri};

    #[test]
    fn test_add_dedups() {
        let mut store = OntologyStore::new();
        let axiom = Axiom::Declaration(Entity::class("http://a#C"));
        store.add(axiom.clone());
        store.add(axiom.clone());
        assert_eq!(store.len(), 1);
        assert!(store.contains(&axiom));
    }

    #[test]
    fn test_axioms_of_kind() {
        let mut store = OntologyStore::new();
        store.add(Axiom::Declaration(Entity::class("http://a#C")));
        store.add(Axiom::SubClassOf {
            sub: Iri::new("http://a#C"),
            sup: Iri::new("http://a#D"),
        });

        assert_eq!(store.axioms_of_kind(AxiomKind::Declaration, true).len(), 1);
        assert_eq!(store.axioms_of_kind(AxiomKind::SubClassOf, true).len(), 1);
        assert!(store
            .axioms_of_kind(AxiomKind::ClassAssertion, true)
            .is_empty());
    }

    #[test]
    fn test_bulk_conversion_bookkeeping() {
        let mut store = OntologyStore::new();
        assert!(!store.in_bulk_conversion());
        store.start_bulk_conversion();
        assert!(store.in_bulk_conversion());
        store.complete_bulk_conversion();
        assert!(!store.in_bulk_conversion());
    }

    #[test]
    fn test_add_routes_rules() {
        let mut store = OntologyStore::new();
        store.add(Axiom::Rule(Rule::new("R1", vec![], vec![])));
        store.add_axiom(Axiom::Rule(Rule::new("R2", vec![], vec![])));

        assert_eq!(store.swrl_rules().len(), 2);
        // Rules live in the rule list, not the axiom set
        assert_eq!(store.len(), 0);
    }
}
