//! Rule engine orchestrator
//!
//! Drives a session against a pluggable target reasoner:
//!
//! 1. `reset` - re-process the ontology, reset the target, clear the
//!    exported-axiom set and the bridge state
//! 2. `import_swrl_rules_and_owl_knowledge` - export every asserted axiom
//!    not already exported
//! 3. `import_sqwrl_query_and_owl_knowledge` - as above, then activate the
//!    named query and export every query (inactive ones with the flag off)
//! 4. `run` - invoke the target reasoner
//! 5. `write_inferred_knowledge` - write built-in-injected and inferred
//!    axioms back to the ontology inside a bulk conversion
//!
//! An axiom is exported at most once per session; the exported set is
//! cleared only by `reset`.

use indexmap::IndexSet;
use tracing::debug;

use crate::config::EngineConfig;
use crate::core::{Ontology, RuleEngineBridge, TargetRuleEngine};
use crate::error::{SqwrlError, SqwrlResult};
use crate::ontology::{Axiom, EntityResolver, OntologyProcessor};
use crate::sqwrl::{Query, QueryResult};

/// The orchestrator's side of the bridge: ontology, processor, and the
/// per-session axiom bookkeeping the target reasoner writes into
pub struct EngineBridge {
    ontology: Box<dyn Ontology>,
    processor: OntologyProcessor,
    exported_axioms: IndexSet<Axiom>,
    injected_axioms: IndexSet<Axiom>,
    inferred_axioms: IndexSet<Axiom>,
}

impl RuleEngineBridge for EngineBridge {
    fn infer_axiom(&mut self, axiom: Axiom) -> SqwrlResult<()> {
        self.inferred_axioms.insert(axiom);
        Ok(())
    }

    fn inject_axiom(&mut self, axiom: Axiom) -> SqwrlResult<()> {
        self.injected_axioms.insert(axiom);
        Ok(())
    }

    fn is_injected_axiom(&self, axiom: &Axiom) -> bool {
        self.injected_axioms.contains(axiom)
    }

    fn result_generator(&mut self, query_name: &str) -> SqwrlResult<&mut QueryResult> {
        self.processor.sqwrl_result_generator(query_name)
    }

    fn resolver(&self) -> &EntityResolver {
        self.processor.resolver()
    }
}

/// A rule engine session over an ontology and a target reasoner
pub struct RuleEngine {
    target: Box<dyn TargetRuleEngine>,
    bridge: EngineBridge,
    config: EngineConfig,
}

impl RuleEngine {
    /// Create an engine with the default configuration
    pub fn new(ontology: Box<dyn Ontology>, target: Box<dyn TargetRuleEngine>) -> Self {
        Self::with_config(ontology, target, EngineConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(
        ontology: Box<dyn Ontology>,
        target: Box<dyn TargetRuleEngine>,
        config: EngineConfig,
    ) -> Self {
        RuleEngine {
            target,
            bridge: EngineBridge {
                ontology,
                processor: OntologyProcessor::new(),
                exported_axioms: IndexSet::new(),
                injected_axioms: IndexSet::new(),
                inferred_axioms: IndexSet::new(),
            },
            config,
        }
    }

    /// Re-process the ontology and clear all per-session state
    pub fn reset(&mut self) -> SqwrlResult<()> {
        self.bridge
            .processor
            .process_ontology(self.bridge.ontology.as_ref(), self.config.include_imports)
            .map_err(|error| {
                SqwrlError::wrap_rule_engine("error resetting rule engine", error)
            })?;

        if self.config.validate_declarations {
            self.bridge.processor.validate_declaration_closure()?;
        }

        self.target
            .reset()
            .map_err(|error| SqwrlError::wrap_rule_engine("error resetting target rule engine", error))?;

        self.bridge.exported_axioms.clear();
        self.bridge.injected_axioms.clear();
        self.bridge.inferred_axioms.clear();
        Ok(())
    }

    /// Load rules and knowledge into the target reasoner
    ///
    /// All existing target state is first cleared by `reset`.
    pub fn import_swrl_rules_and_owl_knowledge(&mut self) -> SqwrlResult<()> {
        self.reset()?;
        self.export_asserted_axioms()
            .map_err(|error| {
                SqwrlError::wrap_rule_engine("error exporting knowledge to rule engine", error)
            })
    }

    /// Load the named query, all rules, and all relevant knowledge
    ///
    /// Every query is exported; only the named one is flagged active.
    pub fn import_sqwrl_query_and_owl_knowledge(&mut self, query_name: &str) -> SqwrlResult<()> {
        self.reset()?;

        if !self.bridge.processor.is_sqwrl_query(query_name) {
            return Err(SqwrlError::invalid_query_name(query_name));
        }

        self.export_asserted_axioms().map_err(|error| {
            SqwrlError::wrap_rule_engine("error exporting knowledge to rule engine", error)
        })?;

        for query in self.bridge.processor.sqwrl_queries_mut() {
            query.set_active(query.name().eq_ignore_ascii_case(query_name));
            self.target.define_query(query).map_err(|error| {
                SqwrlError::wrap_rule_engine("error exporting SQWRL query to rule engine", error)
            })?;
        }
        Ok(())
    }

    /// Invoke the target reasoner
    pub fn run(&mut self) -> SqwrlResult<()> {
        self.target
            .run(&mut self.bridge)
            .map_err(|error| SqwrlError::wrap_rule_engine("error running rule engine", error))
    }

    /// Write built-in-injected and inferred axioms back to the ontology
    pub fn write_inferred_knowledge(&mut self) {
        // Suspend possible event generation for the bulk update
        self.bridge.ontology.start_bulk_conversion();
        for axiom in self.bridge.injected_axioms.iter().cloned() {
            self.bridge.ontology.add_axiom(axiom);
        }
        for axiom in self.bridge.inferred_axioms.iter().cloned() {
            self.bridge.ontology.add_axiom(axiom);
        }
        self.bridge.ontology.complete_bulk_conversion();

        debug!(
            injected = self.bridge.injected_axioms.len(),
            inferred = self.bridge.inferred_axioms.len(),
            "inferred knowledge written back"
        );
    }

    /// Load, run, and write back in one step
    pub fn infer(&mut self) -> SqwrlResult<()> {
        self.import_swrl_rules_and_owl_knowledge()?;
        self.run()?;
        self.write_inferred_knowledge();
        Ok(())
    }

    /// Import the named query, run the reasoner, and return its result
    pub fn run_sqwrl_query(&mut self, query_name: &str) -> SqwrlResult<&QueryResult> {
        self.import_sqwrl_query_and_owl_knowledge(query_name)?;
        self.run()?;
        self.sqwrl_result(query_name)
    }

    /// The result of a previously executed query
    pub fn sqwrl_result(&self, query_name: &str) -> SqwrlResult<&QueryResult> {
        self.bridge.processor.sqwrl_result(query_name)
    }

    /// The queries extracted from the ontology
    pub fn sqwrl_queries(&self) -> impl Iterator<Item = &Query> {
        self.bridge.processor.sqwrl_queries()
    }

    pub fn sqwrl_query_names(&self) -> Vec<String> {
        self.bridge.processor.sqwrl_query_names()
    }

    /// The asserted axioms extracted from the ontology
    pub fn asserted_axioms(&self) -> &IndexSet<Axiom> {
        self.bridge.processor.asserted_axioms()
    }

    pub fn number_of_imported_swrl_rules(&self) -> usize {
        self.bridge.processor.number_of_swrl_rules()
    }

    pub fn number_of_asserted_axioms(&self) -> usize {
        self.bridge.processor.number_of_asserted_axioms()
    }

    /// Axioms injected by built-ins during the last run
    pub fn injected_axioms(&self) -> &IndexSet<Axiom> {
        &self.bridge.injected_axioms
    }

    /// Axioms inferred by the reasoner during the last run
    pub fn inferred_axioms(&self) -> &IndexSet<Axiom> {
        &self.bridge.inferred_axioms
    }

    pub fn is_injected_axiom(&self, axiom: &Axiom) -> bool {
        self.bridge.injected_axioms.contains(axiom)
    }

    /// The underlying ontology
    pub fn ontology(&self) -> &dyn Ontology {
        self.bridge.ontology.as_ref()
    }

    pub fn target_rule_engine_name(&self) -> &str {
        self.target.name()
    }

    pub fn target_rule_engine_version(&self) -> &str {
        self.target.version()
    }

    /// Export every asserted axiom not already exported this session
    fn export_asserted_axioms(&mut self) -> SqwrlResult<()> {
        let axioms: Vec<Axiom> = self
            .bridge
            .processor
            .asserted_axioms()
            .iter()
            .filter(|axiom| !self.bridge.exported_axioms.contains(*axiom))
            .cloned()
            .collect();

        for axiom in axioms {
            self.target.define_axiom(&axiom)?;
            self.bridge.exported_axioms.insert(axiom);
        }

        debug!(exported = self.bridge.exported_axioms.len(), "axioms exported");
        Ok(())
    }
}
