//! SWRL rules and the body canonicalizer
//!
//! A rule is a named pair of ordered atom lists (body, head). Before a rule
//! is handed to a target reasoner its body is canonicalized: class atoms
//! first, then the other non-built-in atoms, then the built-in atoms, with
//! the unbound flag set on every built-in variable argument whose value the
//! built-in itself must produce. Canonicalization is a pure function: it
//! consumes the parsed rule and returns the canonical one.

mod argument;
mod atom;

pub use argument::{BuiltInArgument, CollectionRef};
pub use atom::{
    Atom, AtomArgument, BuiltInAtom, ClassAtom, DataPropertyAtom, IndividualsAtom,
    ObjectPropertyAtom,
};

use std::fmt;
use std::hash::{Hash, Hasher};

use fnv::FnvHashSet;

/// A SWRL rule: named, with ordered body and head atom lists
///
/// Rule identity is by name.
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    body: Vec<Atom>,
    head: Vec<Atom>,
}

impl Rule {
    /// Create a rule from parsed body and head atoms
    pub fn new(name: impl Into<String>, body: Vec<Atom>, head: Vec<Atom>) -> Self {
        Rule {
            name: name.into(),
            body,
            head,
        }
    }

    /// Get the rule name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the body atoms in order
    pub fn body_atoms(&self) -> &[Atom] {
        &self.body
    }

    /// Get the head atoms in order
    pub fn head_atoms(&self) -> &[Atom] {
        &self.head
    }

    /// Built-in atoms in the body whose prefixed name is in `names`
    pub fn built_in_atoms_from_body(&self, names: &[&str]) -> Vec<&BuiltInAtom> {
        filter_built_ins(&self.body, names)
    }

    /// Built-in atoms in the head whose prefixed name is in `names`
    pub fn built_in_atoms_from_head(&self, names: &[&str]) -> Vec<&BuiltInAtom> {
        filter_built_ins(&self.head, names)
    }

    /// Canonicalize the body for left-to-right evaluation
    ///
    /// 1. Non-built-in atoms precede built-in atoms, and class atoms precede
    ///    the other non-built-in atoms; each group keeps its original order.
    /// 2. A built-in variable argument is flagged unbound when its variable
    ///    is referenced by no non-built-in body atom and not already bound
    ///    by an earlier built-in. The leftmost first use wins, so each
    ///    variable is flagged at most once per rule.
    ///
    /// Target reasoners evaluate atoms left to right; ordinary atoms bind
    /// the variables they share with downstream built-ins, so built-ins must
    /// follow them. Class atoms lead as a tie-break, giving the reasoner's
    /// indexer a chance to prune by type first.
    pub fn canonicalize(self) -> Rule {
        let Rule { name, body, head } = self;

        let mut class_atoms = Vec::new();
        let mut other_atoms = Vec::new();
        let mut built_ins: Vec<BuiltInAtom> = Vec::new();
        let mut defined_variables: FnvHashSet<String> = FnvHashSet::default();

        for atom in body {
            match atom {
                Atom::BuiltIn(built_in) => built_ins.push(built_in),
                atom => {
                    defined_variables.extend(atom.referenced_variable_names());
                    if atom.is_class_atom() {
                        class_atoms.push(atom);
                    } else {
                        other_atoms.push(atom);
                    }
                }
            }
        }

        // Walk built-ins in their original order; the first built-in to use
        // a variable not bound elsewhere is the one that must produce it.
        let mut bound_by_built_ins: FnvHashSet<String> = FnvHashSet::default();
        for built_in in &mut built_ins {
            for argument in &mut built_in.arguments {
                if let BuiltInArgument::Variable { name, unbound } = argument {
                    if !defined_variables.contains(name.as_str())
                        && !bound_by_built_ins.contains(name.as_str())
                    {
                        *unbound = true;
                        bound_by_built_ins.insert(name.clone());
                    }
                }
            }
        }

        let mut body = class_atoms;
        body.extend(other_atoms);
        body.extend(built_ins.into_iter().map(Atom::BuiltIn));

        Rule { name, body, head }
    }
}

fn filter_built_ins<'a>(atoms: &'a [Atom], names: &[&str]) -> Vec<&'a BuiltInAtom> {
    atoms
        .iter()
        .filter_map(Atom::as_built_in)
        .filter(|built_in| names.contains(&built_in.name()))
        .collect()
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, atom) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, " ^ ")?;
            }
            write!(f, "{}", atom)?;
        }
        write!(f, " -> ")?;
        for (i, atom) in self.head.iter().enumerate() {
            if i > 0 {
                write!(f, " ^ ")?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}
