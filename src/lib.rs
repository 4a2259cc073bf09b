//! SQWRL - a SWRL rule and SQWRL query engine core
//!
//! A rule-and-query engine for an ontology-based knowledge representation.
//! Given a knowledge base of declarative facts (classes, individuals,
//! properties, and their assertions) and a set of Horn-style SWRL rules, it
//! prepares those rules for evaluation by a pluggable target reasoner and
//! returns tabular results for the rules that are SQWRL queries.
//!
//! # Architecture
//!
//! - [`term`] - typed literal and entity values with a total order
//! - [`rule`] - atoms, built-in arguments, and the body canonicalizer
//! - [`ontology`] - axioms, the in-memory store, the processor that
//!   extracts asserted axioms and synthesizes declarations, and the entity
//!   resolver
//! - [`sqwrl`] - query detection and the three-phase tabular result engine
//! - [`engine`] - the session orchestrator driving a [`core::TargetRuleEngine`]
//!
//! # Example
//!
//! ```rust,ignore
//! use sqwrl::{Atom, AtomArgument, BuiltInArgument, OntologyStore, Rule, RuleEngine};
//!
//! let mut store = OntologyStore::new();
//! store.add_rule(Rule::new(
//!     "Q1",
//!     vec![Atom::class("http://example.org#Person", AtomArgument::variable("p"))],
//!     vec![Atom::built_in("sqwrl:select", vec![BuiltInArgument::variable("p")])],
//! ));
//!
//! let mut engine = RuleEngine::new(Box::new(store), Box::new(my_reasoner));
//! let result = engine.run_sqwrl_query("Q1")?;
//! while result.has_next()? {
//!     println!("{}", result.value("p")?);
//!     result.next()?;
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod ontology;
pub mod rule;
pub mod sqwrl;
pub mod term;

// Re-export core traits and namespace constants
pub use crate::core::{ns, Ontology, RuleEngineBridge, TargetRuleEngine};

// Re-export term types
pub use term::{Entity, EntityKind, Iri, Literal, XsdDatatype, XsdDuration};

// Re-export rule types
pub use rule::{Atom, AtomArgument, BuiltInArgument, BuiltInAtom, CollectionRef, Rule};

// Re-export ontology types
pub use ontology::{Axiom, AxiomKind, EntityResolver, OntologyProcessor, OntologyStore};

// Re-export SQWRL types
pub use sqwrl::{AggregateFunction, Query, QueryResult, ResultValue};

// Re-export engine types
pub use engine::{EngineBridge, RuleEngine};

// Re-export configuration and error types
pub use config::EngineConfig;
pub use error::{ErrorCode, SqwrlError, SqwrlResult};
