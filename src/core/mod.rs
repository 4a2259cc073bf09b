//! Core abstractions: namespace constants and collaborator traits

mod namespaces;
mod traits;

pub use namespaces::ns;
pub use traits::{Ontology, RuleEngineBridge, TargetRuleEngine};
