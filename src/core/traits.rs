//! Core trait abstractions for pluggable collaborators
//!
//! This module defines the seams between the engine core and its external
//! collaborators:
//!
//! - [`Ontology`] - the source of asserted axioms and rules
//! - [`TargetRuleEngine`] - the reasoner that evaluates exported knowledge
//! - [`RuleEngineBridge`] - the write-back surface a running reasoner uses
//!
//! All three are dyn-compatible so implementations can be swapped behind
//! trait objects.

use crate::error::SqwrlResult;
use crate::ontology::{Axiom, AxiomKind, EntityResolver};
use crate::rule::Rule;
use crate::sqwrl::{Query, QueryResult};

/// An ontology: the source of asserted axioms and SWRL rules
///
/// The engine walks axioms kind by kind and re-walks from scratch on every
/// reset; implementations only need set-at-a-time access, not change
/// notification.
pub trait Ontology {
    /// All axioms of the requested kind, optionally including imports
    fn axioms_of_kind(&self, kind: AxiomKind, include_imports: bool) -> Vec<Axiom>;

    /// All rule axioms (SQWRL queries included; the processor separates them)
    fn swrl_rules(&self) -> Vec<Rule>;

    /// Add an axiom (used for inferred-knowledge write-back)
    fn add_axiom(&mut self, axiom: Axiom);

    /// Suspend change notification for a bulk update
    fn start_bulk_conversion(&mut self) {}

    /// Resume change notification after a bulk update
    fn complete_bulk_conversion(&mut self) {}
}

/// A target rule engine (reasoner) the orchestrator drives
///
/// The reasoner receives asserted axioms and queries, then evaluates them
/// when `run` is called. During `run` it reports inferred axioms and
/// populates query results through the supplied [`RuleEngineBridge`].
pub trait TargetRuleEngine {
    /// Name of this rule engine
    fn name(&self) -> &str;

    /// Version of this rule engine
    fn version(&self) -> &str;

    /// Receive an asserted axiom (SWRL rules included)
    fn define_axiom(&mut self, axiom: &Axiom) -> SqwrlResult<()>;

    /// Receive a query; its active flag indicates whether its result table
    /// is to be populated
    fn define_query(&mut self, query: &Query) -> SqwrlResult<()>;

    /// Perform reasoning, writing back through the bridge
    fn run(&mut self, bridge: &mut dyn RuleEngineBridge) -> SqwrlResult<()>;

    /// Discard all exported state
    fn reset(&mut self) -> SqwrlResult<()>;
}

/// The write-back surface available to a running target reasoner
pub trait RuleEngineBridge {
    /// Report an axiom inferred by rule evaluation
    fn infer_axiom(&mut self, axiom: Axiom) -> SqwrlResult<()>;

    /// Report an axiom injected by a built-in
    fn inject_axiom(&mut self, axiom: Axiom) -> SqwrlResult<()>;

    /// Check whether an axiom was injected by a built-in this session
    fn is_injected_axiom(&self, axiom: &Axiom) -> bool;

    /// The result generator of a query, for row population
    fn result_generator(&mut self, query_name: &str) -> SqwrlResult<&mut QueryResult>;

    /// The entity resolver populated by the last ontology walk
    fn resolver(&self) -> &EntityResolver;
}
