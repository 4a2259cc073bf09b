//! SQWRL queries
//!
//! A SQWRL query is a SWRL rule that calls query built-ins (select,
//! aggregation, ordering, selection operators) to produce a tabular result
//! instead of asserting new axioms. This module holds the SQWRL built-in
//! name vocabulary, the query type, and the three-phase result engine.

mod result;
mod value;

pub use result::{AggregateFunction, QueryResult};
pub use value::ResultValue;

use crate::error::{SqwrlError, SqwrlResult};
use crate::rule::{Atom, BuiltInAtom, BuiltInArgument, Rule};

/// The SQWRL built-in names; a rule calling any of these is a query
pub mod names {
    pub const SELECT: &str = "sqwrl:select";
    pub const SELECT_DISTINCT: &str = "sqwrl:selectDistinct";
    pub const COUNT: &str = "sqwrl:count";
    pub const COUNT_DISTINCT: &str = "sqwrl:countDistinct";
    pub const MIN: &str = "sqwrl:min";
    pub const MAX: &str = "sqwrl:max";
    pub const SUM: &str = "sqwrl:sum";
    pub const AVG: &str = "sqwrl:avg";
    pub const ORDER_BY: &str = "sqwrl:orderBy";
    pub const ORDER_BY_DESCENDING: &str = "sqwrl:orderByDescending";
    pub const COLUMN_NAMES: &str = "sqwrl:columnNames";
    pub const LIMIT: &str = "sqwrl:limit";
    pub const NTH: &str = "sqwrl:nth";
    pub const NOT_NTH: &str = "sqwrl:notNth";
    pub const FIRST: &str = "sqwrl:first";
    pub const NOT_FIRST: &str = "sqwrl:notFirst";
    pub const LAST: &str = "sqwrl:last";
    pub const NOT_LAST: &str = "sqwrl:notLast";
    pub const NTH_SLICE: &str = "sqwrl:nthSlice";
    pub const NOT_NTH_SLICE: &str = "sqwrl:notNthSlice";
    pub const NTH_LAST_SLICE: &str = "sqwrl:nthLastSlice";
    pub const NOT_NTH_LAST_SLICE: &str = "sqwrl:notNthLastSlice";
    pub const MAKE_SET: &str = "sqwrl:makeSet";
    pub const MAKE_BAG: &str = "sqwrl:makeBag";
    pub const GROUP_BY: &str = "sqwrl:groupBy";
    pub const SIZE: &str = "sqwrl:size";
    pub const IS_EMPTY: &str = "sqwrl:isEmpty";
    pub const NOT_EMPTY: &str = "sqwrl:notEmpty";
    pub const ELEMENT: &str = "sqwrl:element";
    pub const NOT_ELEMENT: &str = "sqwrl:notElement";

    /// Every SQWRL built-in name
    pub const ALL: &[&str] = &[
        SELECT,
        SELECT_DISTINCT,
        COUNT,
        COUNT_DISTINCT,
        MIN,
        MAX,
        SUM,
        AVG,
        ORDER_BY,
        ORDER_BY_DESCENDING,
        COLUMN_NAMES,
        LIMIT,
        NTH,
        NOT_NTH,
        FIRST,
        NOT_FIRST,
        LAST,
        NOT_LAST,
        NTH_SLICE,
        NOT_NTH_SLICE,
        NTH_LAST_SLICE,
        NOT_NTH_LAST_SLICE,
        MAKE_SET,
        MAKE_BAG,
        GROUP_BY,
        SIZE,
        IS_EMPTY,
        NOT_EMPTY,
        ELEMENT,
        NOT_ELEMENT,
    ];

    /// Check if a prefixed built-in name is a SQWRL built-in
    pub fn is_sqwrl_built_in(name: &str) -> bool {
        ALL.contains(&name)
    }

    /// The local part of a SQWRL built-in name
    pub fn local_name(name: &str) -> Option<&str> {
        name.strip_prefix("sqwrl:")
    }
}

/// A rule is a query iff its body or head calls a SQWRL built-in
pub fn is_sqwrl_query(rule: &Rule) -> bool {
    !rule.built_in_atoms_from_head(names::ALL).is_empty()
        || !rule.built_in_atoms_from_body(names::ALL).is_empty()
}

/// A SQWRL query: a detected query rule with its owned result
///
/// Construction configures the result from the query's own SQWRL built-ins
/// (select, aggregation, ordering, column names, selection operators) and
/// seals it, so the result generator is ready for row population when the
/// query is handed to a target reasoner.
#[derive(Debug)]
pub struct Query {
    name: String,
    body_atoms: Vec<Atom>,
    head_atoms: Vec<Atom>,
    active: bool,
    result: QueryResult,
}

impl Query {
    /// Build a query from a canonicalized rule
    pub fn from_rule(rule: Rule) -> SqwrlResult<Query> {
        let mut result = QueryResult::new();
        let mut column_names: Vec<String> = Vec::new();

        let head_built_ins: Vec<&BuiltInAtom> = rule
            .head_atoms()
            .iter()
            .filter_map(Atom::as_built_in)
            .collect();

        // Projection first, so ordering and slicing can refer to columns
        for built_in in &head_built_ins {
            configure_projection(built_in, &mut result, &mut column_names)?;
        }
        for built_in in &head_built_ins {
            configure_ordering_and_selection(built_in, &mut result, &column_names)?;
        }

        result.configured()?;

        Ok(Query {
            name: rule.name().to_string(),
            body_atoms: rule.body_atoms().to_vec(),
            head_atoms: rule.head_atoms().to_vec(),
            active: false,
            result,
        })
    }

    /// Get the query name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the canonicalized body atoms
    pub fn body_atoms(&self) -> &[Atom] {
        &self.body_atoms
    }

    /// Get the head atoms
    pub fn head_atoms(&self) -> &[Atom] {
        &self.head_atoms
    }

    /// Whether this query's result table is to be populated
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Set the active flag
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The result for consumption
    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    /// The result generator for row population
    pub fn result_generator(&mut self) -> &mut QueryResult {
        &mut self.result
    }
}

fn configure_projection(
    built_in: &BuiltInAtom,
    result: &mut QueryResult,
    column_names: &mut Vec<String>,
) -> SqwrlResult<()> {
    let Some(local) = names::local_name(built_in.name()) else {
        return Ok(());
    };

    match local {
        "select" | "selectDistinct" => {
            for argument in built_in.arguments() {
                let name = column_name_of(argument);
                result.add_column(&name)?;
                column_names.push(name);
            }
            if local == "selectDistinct" {
                result.set_is_distinct()?;
            }
        }
        "min" | "max" | "sum" | "avg" | "count" | "countDistinct" => {
            let function = if local == "countDistinct" {
                AggregateFunction::CountDistinct.name()
            } else {
                local
            };
            for argument in built_in.arguments() {
                let name = column_name_of(argument);
                result.add_aggregate_column(&name, function)?;
                column_names.push(name);
            }
        }
        "columnNames" => {
            for argument in built_in.arguments() {
                let name = argument
                    .as_literal()
                    .and_then(|literal| literal.as_string().ok())
                    .ok_or_else(|| {
                        SqwrlError::invalid_query(format!(
                            "{} expects string literal arguments",
                            built_in.name()
                        ))
                    })?;
                result.add_column_display_name(name)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn configure_ordering_and_selection(
    built_in: &BuiltInAtom,
    result: &mut QueryResult,
    column_names: &[String],
) -> SqwrlResult<()> {
    let Some(local) = names::local_name(built_in.name()) else {
        return Ok(());
    };

    match local {
        "orderBy" | "orderByDescending" => {
            let ascending = local == "orderBy";
            for argument in built_in.arguments() {
                let variable = argument.variable_name().ok_or_else(|| {
                    SqwrlError::invalid_query(format!(
                        "{} expects variable arguments",
                        built_in.name()
                    ))
                })?;
                let column_index = column_names
                    .iter()
                    .position(|name| name == variable)
                    .ok_or_else(|| {
                        SqwrlError::invalid_query(format!(
                            "order by column ?{} is not a selected or aggregated column",
                            variable
                        ))
                    })?;
                result.add_order_by_column(column_index, ascending)?;
            }
        }
        "limit" => result.set_limit(integer_argument(built_in, 0)?)?,
        "nth" => result.set_nth(integer_argument(built_in, 0)?)?,
        "notNth" => result.set_not_nth(integer_argument(built_in, 0)?)?,
        "first" => result.set_first(optional_integer_argument(built_in, 0)?)?,
        "notFirst" => result.set_not_first(optional_integer_argument(built_in, 0)?)?,
        "last" => result.set_last(optional_integer_argument(built_in, 0)?)?,
        "notLast" => result.set_not_last(optional_integer_argument(built_in, 0)?)?,
        "nthSlice" => {
            result.set_nth_slice(integer_argument(built_in, 0)?, integer_argument(built_in, 1)?)?
        }
        "notNthSlice" => result
            .set_not_nth_slice(integer_argument(built_in, 0)?, integer_argument(built_in, 1)?)?,
        "nthLastSlice" => result
            .set_nth_last_slice(integer_argument(built_in, 0)?, integer_argument(built_in, 1)?)?,
        "notNthLastSlice" => result.set_not_nth_last_slice(
            integer_argument(built_in, 0)?,
            integer_argument(built_in, 1)?,
        )?,
        _ => {}
    }
    Ok(())
}

/// Columns are named after the selected variable; non-variable arguments
/// use their display text
fn column_name_of(argument: &BuiltInArgument) -> String {
    match argument.variable_name() {
        Some(name) => name.to_string(),
        None => argument.to_string(),
    }
}

fn integer_argument(built_in: &BuiltInAtom, index: usize) -> SqwrlResult<i32> {
    let argument = built_in.arguments().get(index).ok_or_else(|| {
        SqwrlError::invalid_query(format!(
            "{} expects an integer argument at position {}",
            built_in.name(),
            index + 1
        ))
    })?;
    let value = argument
        .as_literal()
        .filter(|literal| literal.is_numeric())
        .map(|literal| literal.as_long())
        .transpose()?
        .ok_or_else(|| {
            SqwrlError::invalid_query(format!(
                "{} expects an integer argument, got {}",
                built_in.name(),
                argument
            ))
        })?;
    i32::try_from(value).map_err(|_| {
        SqwrlError::invalid_query(format!(
            "{} argument {} out of range",
            built_in.name(),
            value
        ))
    })
}

fn optional_integer_argument(built_in: &BuiltInAtom, index: usize) -> SqwrlResult<i32> {
    if built_in.arguments().is_empty() {
        Ok(1)
    } else {
        integer_argument(built_in, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::AtomArgument;
    use crate::term::Literal;

    fn select_query_rule() -> Rule {
        Rule::new(
            "Q1",
            vec![Atom::class(
                "http://a#Person",
                AtomArgument::variable("p"),
            )],
            vec![Atom::built_in(
                names::SELECT,
                vec![BuiltInArgument::variable("p")],
            )],
        )
    }

    #[test]
    fn test_query_detection() {
        assert!(is_sqwrl_query(&select_query_rule()));

        let plain = Rule::new(
            "R1",
            vec![Atom::class(
                "http://a#Person",
                AtomArgument::variable("p"),
            )],
            vec![Atom::built_in(
                "swrlb:add",
                vec![BuiltInArgument::variable("x")],
            )],
        );
        assert!(!is_sqwrl_query(&plain));
    }

    #[test]
    fn test_detection_in_body() {
        let rule = Rule::new(
            "Q2",
            vec![Atom::built_in(
                names::MAKE_SET,
                vec![BuiltInArgument::variable("s"), BuiltInArgument::variable("e")],
            )],
            vec![],
        );
        assert!(is_sqwrl_query(&rule));
    }

    #[test]
    fn test_from_rule_configures_columns() {
        let query = Query::from_rule(select_query_rule()).unwrap();
        assert_eq!(query.name(), "Q1");
        assert!(query.result().is_configured());
        assert_eq!(query.result().number_of_columns().unwrap(), 1);
        assert_eq!(query.result().column_names().unwrap(), vec!["p".to_string()]);
        assert!(!query.is_active());
    }

    #[test]
    fn test_from_rule_with_aggregate_and_order() {
        let rule = Rule::new(
            "Q3",
            vec![],
            vec![
                Atom::built_in(names::SELECT, vec![BuiltInArgument::variable("name")]),
                Atom::built_in(names::AVG, vec![BuiltInArgument::variable("age")]),
                Atom::built_in(names::ORDER_BY, vec![BuiltInArgument::variable("name")]),
                Atom::built_in(
                    names::LIMIT,
                    vec![BuiltInArgument::literal(Literal::int(10))],
                ),
            ],
        );
        let query = Query::from_rule(rule).unwrap();
        assert_eq!(query.result().number_of_columns().unwrap(), 2);
        assert!(query.result().is_ordered());
        assert!(query.result().is_ascending());
    }

    #[test]
    fn test_select_distinct() {
        let rule = Rule::new(
            "Q4",
            vec![],
            vec![Atom::built_in(
                names::SELECT_DISTINCT,
                vec![BuiltInArgument::variable("x")],
            )],
        );
        let query = Query::from_rule(rule).unwrap();
        assert!(query.result().is_distinct());
    }

    #[test]
    fn test_order_by_unselected_variable_fails() {
        let rule = Rule::new(
            "Q5",
            vec![],
            vec![
                Atom::built_in(names::SELECT, vec![BuiltInArgument::variable("x")]),
                Atom::built_in(names::ORDER_BY, vec![BuiltInArgument::variable("y")]),
            ],
        );
        let err = Query::from_rule(rule).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidQuery);
    }

    #[test]
    fn test_order_before_select_in_head() {
        // Projection is gathered before ordering, whatever the head order
        let rule = Rule::new(
            "Q6",
            vec![],
            vec![
                Atom::built_in(names::ORDER_BY, vec![BuiltInArgument::variable("x")]),
                Atom::built_in(names::SELECT, vec![BuiltInArgument::variable("x")]),
            ],
        );
        let query = Query::from_rule(rule).unwrap();
        assert!(query.result().is_ordered());
    }

    #[test]
    fn test_active_flag() {
        let mut query = Query::from_rule(select_query_rule()).unwrap();
        query.set_active(true);
        assert!(query.is_active());
    }

    #[test]
    fn test_column_display_names_from_head() {
        let rule = Rule::new(
            "Q7",
            vec![],
            vec![
                Atom::built_in(names::SELECT, vec![BuiltInArgument::variable("x")]),
                Atom::built_in(
                    names::COLUMN_NAMES,
                    vec![BuiltInArgument::literal(Literal::string("Person"))],
                ),
            ],
        );
        let query = Query::from_rule(rule).unwrap();
        assert_eq!(
            query.result().column_names().unwrap(),
            vec!["Person".to_string()]
        );
    }
}
