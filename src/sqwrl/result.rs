//! The SQWRL tabular result engine
//!
//! A result is built and consumed in three phases:
//!
//! 1. **Configuring** - columns, aggregates, ordering, distinctness, and
//!    selection operators are declared. Closed by [`QueryResult::configured`].
//! 2. **Preparing** - rows are added, either cell by cell between
//!    `open_row`/`close_row` or whole rows at once. Closed by
//!    [`QueryResult::prepared`], which runs the prepare pipeline:
//!    aggregate, distinct, order-by, selection operators, column vectors.
//! 3. **Processing** - rows are read through a cursor or by random access.
//!
//! Every operation checks the phase and fails with a result-state error
//! outside its legal phase; a result that errored must be rebuilt.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::error::{SqwrlError, SqwrlResult};
use crate::sqwrl::value::ResultValue;
use crate::term::{Iri, Literal};

type Row = Vec<ResultValue>;

/// An aggregate function applied to a result column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Min,
    Max,
    Sum,
    Avg,
    Count,
    CountDistinct,
}

impl AggregateFunction {
    /// Parse an aggregate function name; matching is by normalized
    /// lowercase form
    pub fn parse(name: &str) -> SqwrlResult<AggregateFunction> {
        match name.to_ascii_lowercase().as_str() {
            "min" => Ok(AggregateFunction::Min),
            "max" => Ok(AggregateFunction::Max),
            "sum" => Ok(AggregateFunction::Sum),
            "avg" => Ok(AggregateFunction::Avg),
            "count" => Ok(AggregateFunction::Count),
            "count-distinct" | "countdistinct" => Ok(AggregateFunction::CountDistinct),
            _ => Err(SqwrlError::invalid_aggregate_function(name)),
        }
    }

    /// The canonical name of this function
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Count => "count",
            AggregateFunction::CountDistinct => "count-distinct",
        }
    }

    /// min, max, sum, and avg only accept numeric values
    fn requires_numeric_values(&self) -> bool {
        matches!(
            self,
            AggregateFunction::Min
                | AggregateFunction::Max
                | AggregateFunction::Sum
                | AggregateFunction::Avg
        )
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResultPhase {
    Configuring,
    Preparing,
    Processing,
}

/// Selection operator configuration; 1-based indices, clamped up to 1
#[derive(Clone, Debug, Default)]
struct SelectionOperators {
    limit: Option<i32>,
    nth: Option<i32>,
    not_nth: Option<i32>,
    first: Option<i32>,
    not_first: Option<i32>,
    last: Option<i32>,
    not_last: Option<i32>,
    nth_slice: Option<(i32, i32)>,
    not_nth_slice: Option<(i32, i32)>,
    nth_last_slice: Option<(i32, i32)>,
    not_nth_last_slice: Option<(i32, i32)>,
}

impl SelectionOperators {
    fn any_enabled(&self) -> bool {
        self.limit.is_some()
            || self.nth.is_some()
            || self.not_nth.is_some()
            || self.first.is_some()
            || self.not_first.is_some()
            || self.last.is_some()
            || self.not_last.is_some()
            || self.nth_slice.is_some()
            || self.not_nth_slice.is_some()
            || self.nth_last_slice.is_some()
            || self.not_nth_last_slice.is_some()
    }
}

/// A three-phase SQWRL result: generator and consumer in one structure
#[derive(Debug)]
pub struct QueryResult {
    phase: ResultPhase,

    all_column_names: Vec<String>,
    column_display_names: Vec<String>,
    selected_column_indexes: Vec<usize>,
    aggregate_columns: IndexMap<usize, AggregateFunction>,
    order_by_columns: Vec<usize>,
    is_ordered: bool,
    is_ascending: bool,
    is_distinct: bool,
    selection: SelectionOperators,

    rows: Vec<Row>,
    row_data: Row,
    is_row_open: bool,

    cursor: isize,
    column_values: IndexMap<String, Vec<ResultValue>>,
}

impl QueryResult {
    /// Create a result in the Configuring phase
    pub fn new() -> Self {
        QueryResult {
            phase: ResultPhase::Configuring,
            all_column_names: Vec::new(),
            column_display_names: Vec::new(),
            selected_column_indexes: Vec::new(),
            aggregate_columns: IndexMap::new(),
            order_by_columns: Vec::new(),
            is_ordered: false,
            is_ascending: true,
            is_distinct: false,
            selection: SelectionOperators::default(),
            rows: Vec::new(),
            row_data: Vec::new(),
            is_row_open: false,
            cursor: -1,
            column_values: IndexMap::new(),
        }
    }

    // ========================================================================
    // Phase predicates
    // ========================================================================

    pub fn is_configured(&self) -> bool {
        self.phase != ResultPhase::Configuring
    }

    pub fn is_prepared(&self) -> bool {
        self.phase == ResultPhase::Processing
    }

    pub fn is_row_open(&self) -> bool {
        self.is_row_open
    }

    pub fn is_ordered(&self) -> bool {
        self.is_ordered
    }

    pub fn is_ascending(&self) -> bool {
        self.is_ascending
    }

    pub fn is_distinct(&self) -> bool {
        self.is_distinct
    }

    // ========================================================================
    // Configuration phase
    // ========================================================================

    /// Append a selected column
    pub fn add_column(&mut self, name: impl Into<String>) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selected_column_indexes.push(self.all_column_names.len());
        self.all_column_names.push(name.into());
        Ok(())
    }

    /// Append several selected columns
    pub fn add_columns(&mut self, names: &[&str]) -> SqwrlResult<()> {
        for name in names {
            self.add_column(*name)?;
        }
        Ok(())
    }

    /// Append an aggregate column reduced by the named function
    pub fn add_aggregate_column(
        &mut self,
        name: impl Into<String>,
        function: &str,
    ) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        let function = AggregateFunction::parse(function)?;
        self.aggregate_columns
            .insert(self.all_column_names.len(), function);
        self.all_column_names.push(name.into());
        Ok(())
    }

    /// Declare an order-by column; the first declaration fixes the
    /// direction and later ones must agree
    pub fn add_order_by_column(&mut self, column_index: usize, ascending: bool) -> SqwrlResult<()> {
        self.ensure_configuring()?;

        if column_index >= self.all_column_names.len() {
            return Err(SqwrlError::invalid_query(format!(
                "ordered column index {} out of range",
                column_index
            )));
        }

        if self.is_ordered && self.is_ascending != ascending {
            return Err(SqwrlError::invalid_query(format!(
                "attempt to order column {} {} when {} was previously specified",
                self.all_column_names[column_index],
                direction_name(ascending),
                direction_name(self.is_ascending)
            )));
        }

        self.is_ordered = true;
        self.is_ascending = ascending;
        self.order_by_columns.push(column_index);
        Ok(())
    }

    /// Append a display name overriding the corresponding column name
    pub fn add_column_display_name(&mut self, name: impl Into<String>) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        let name = name.into();
        if name.is_empty() || name.contains(',') {
            return Err(SqwrlError::invalid_query(format!(
                "invalid column name {} - no commas or empty names allowed",
                name
            )));
        }
        self.column_display_names.push(name);
        Ok(())
    }

    /// Request duplicate-row elimination
    pub fn set_is_distinct(&mut self) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.is_distinct = true;
        Ok(())
    }

    /// Close configuration and enter the Preparing phase
    pub fn configured(&mut self) -> SqwrlResult<()> {
        self.ensure_configuring()?;

        if self
            .selected_column_indexes
            .iter()
            .any(|index| self.aggregate_columns.contains_key(index))
        {
            return Err(SqwrlError::invalid_query(
                "aggregate columns cannot also be selected columns",
            ));
        }

        self.phase = ResultPhase::Preparing;
        Ok(())
    }

    // ========================================================================
    // Selection operators (configured before `configured()`)
    // ========================================================================

    pub fn set_limit(&mut self, limit: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.limit = Some(limit);
        Ok(())
    }

    pub fn set_nth(&mut self, nth: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.nth = Some(nth);
        Ok(())
    }

    pub fn set_not_nth(&mut self, nth: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.not_nth = Some(nth);
        Ok(())
    }

    pub fn set_first(&mut self, n: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.first = Some(n);
        Ok(())
    }

    pub fn set_not_first(&mut self, n: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.not_first = Some(n);
        Ok(())
    }

    pub fn set_last(&mut self, n: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.last = Some(n);
        Ok(())
    }

    pub fn set_not_last(&mut self, n: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.not_last = Some(n);
        Ok(())
    }

    pub fn set_nth_slice(&mut self, nth: i32, slice_size: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.nth_slice = Some((nth, slice_size));
        Ok(())
    }

    pub fn set_not_nth_slice(&mut self, nth: i32, slice_size: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.not_nth_slice = Some((nth, slice_size));
        Ok(())
    }

    pub fn set_nth_last_slice(&mut self, nth: i32, slice_size: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.nth_last_slice = Some((nth, slice_size));
        Ok(())
    }

    pub fn set_not_nth_last_slice(&mut self, nth: i32, slice_size: i32) -> SqwrlResult<()> {
        self.ensure_configuring()?;
        self.selection.not_nth_last_slice = Some((nth, slice_size));
        Ok(())
    }

    // ========================================================================
    // Preparation phase
    // ========================================================================

    /// Open a fresh row
    pub fn open_row(&mut self) -> SqwrlResult<()> {
        self.ensure_preparing()?;
        if self.is_row_open {
            return Err(SqwrlError::result_state("attempt to open an already open row"));
        }
        self.row_data = Vec::with_capacity(self.all_column_names.len());
        self.is_row_open = true;
        Ok(())
    }

    /// Append a value to the open row; the row auto-closes once every
    /// column has a value
    pub fn add_row_data(&mut self, value: ResultValue) -> SqwrlResult<()> {
        self.ensure_preparing()?;
        if !self.is_row_open {
            return Err(SqwrlError::result_state("attempt to add data to an unopened row"));
        }
        if self.row_data.len() == self.all_column_names.len() {
            return Err(SqwrlError::result_state(
                "attempt to add data beyond the end of a row",
            ));
        }

        if let Some(function) = self.aggregate_columns.get(&self.row_data.len()) {
            if function.requires_numeric_values() && !value.is_numeric() {
                return Err(SqwrlError::literal_type(format!(
                    "attempt to add non numeric value {} to {} aggregate column {}",
                    value,
                    function,
                    self.all_column_names[self.row_data.len()]
                )));
            }
        }

        self.row_data.push(value);

        if self.row_data.len() == self.all_column_names.len() {
            self.close_row()?;
        }
        Ok(())
    }

    /// Close the open row; ignored when the row was auto-closed
    pub fn close_row(&mut self) -> SqwrlResult<()> {
        self.ensure_preparing()?;
        if self.is_row_open {
            self.rows.push(std::mem::take(&mut self.row_data));
        }
        self.is_row_open = false;
        Ok(())
    }

    /// Add a complete row: open, fill, close
    pub fn add_row(&mut self, values: Vec<ResultValue>) -> SqwrlResult<()> {
        self.ensure_preparing()?;
        if values.len() != self.all_column_names.len() {
            return Err(SqwrlError::invalid_query(format!(
                "add_row expecting {} values, got {}",
                self.all_column_names.len(),
                values.len()
            )));
        }
        self.open_row()?;
        for value in values {
            self.add_row_data(value)?;
        }
        self.close_row()
    }

    /// Close preparation and enter the Processing phase
    ///
    /// Runs the prepare pipeline in fixed order: aggregate (which subsumes
    /// distinct on the selected columns), distinct, order-by, selection
    /// operators, column vectors. A freshly opened but empty row is
    /// discarded; a partially filled one is an error.
    pub fn prepared(&mut self) -> SqwrlResult<()> {
        self.ensure_preparing()?;
        if self.is_row_open && !self.row_data.is_empty() {
            return Err(SqwrlError::result_state(
                "attempt to process result with a partially prepared row",
            ));
        }

        let mut rows = std::mem::take(&mut self.rows);

        if !self.aggregate_columns.is_empty() {
            rows = self.aggregate(rows)?;
        } else if self.is_distinct {
            rows = distinct(rows);
        }

        if self.is_ordered {
            self.order_by(&mut rows)?;
        }

        rows = self.apply_selection_operators(rows);

        self.rows = rows;
        self.prepare_column_vectors();

        self.is_row_open = false;
        self.row_data.clear();
        self.cursor = if self.rows.is_empty() { -1 } else { 0 };
        self.phase = ResultPhase::Processing;
        Ok(())
    }

    // ========================================================================
    // Result structure access
    // ========================================================================

    /// The number of columns (legal once configured)
    pub fn number_of_columns(&self) -> SqwrlResult<usize> {
        self.ensure_configured()?;
        Ok(self.all_column_names.len())
    }

    /// The effective column names: display names where declared, declared
    /// names otherwise
    pub fn column_names(&self) -> SqwrlResult<Vec<String>> {
        self.ensure_configured()?;
        Ok((0..self.all_column_names.len())
            .map(|index| self.effective_column_name(index).to_string())
            .collect())
    }

    /// The effective name of one column
    pub fn column_name(&self, column_index: usize) -> SqwrlResult<&str> {
        self.ensure_configured()?;
        self.check_column_index(column_index)?;
        Ok(self.effective_column_name(column_index))
    }

    // ========================================================================
    // Processing phase: cursor
    // ========================================================================

    /// The number of rows in the prepared result
    pub fn number_of_rows(&self) -> SqwrlResult<usize> {
        self.ensure_processing()?;
        Ok(self.rows.len())
    }

    /// Whether the prepared result has no rows
    pub fn is_empty(&self) -> SqwrlResult<bool> {
        Ok(self.number_of_rows()? == 0)
    }

    /// Rewind the cursor to the first row
    pub fn reset(&mut self) -> SqwrlResult<()> {
        self.ensure_processing()?;
        if !self.rows.is_empty() {
            self.cursor = 0;
        }
        Ok(())
    }

    /// Whether the cursor is on a row
    pub fn has_next(&self) -> SqwrlResult<bool> {
        self.ensure_processing()?;
        Ok(self.cursor >= 0 && (self.cursor as usize) < self.rows.len())
    }

    /// Advance the cursor
    pub fn next(&mut self) -> SqwrlResult<()> {
        self.ensure_processing()?;
        self.check_not_at_end()?;
        self.cursor += 1;
        Ok(())
    }

    /// The current row
    pub fn row(&self) -> SqwrlResult<&[ResultValue]> {
        self.ensure_processing()?;
        self.check_not_at_end()?;
        Ok(&self.rows[self.cursor as usize])
    }

    /// The current row's value in the named column
    pub fn value(&self, column_name: &str) -> SqwrlResult<&ResultValue> {
        let column_index = self.column_index(column_name)?;
        self.value_at(column_index)
    }

    /// The current row's value at a column index
    pub fn value_at(&self, column_index: usize) -> SqwrlResult<&ResultValue> {
        self.ensure_processing()?;
        self.check_not_at_end()?;
        self.check_column_index(column_index)?;
        Ok(&self.rows[self.cursor as usize][column_index])
    }

    /// Random access to any cell
    pub fn cell(&self, column_index: usize, row_index: usize) -> SqwrlResult<&ResultValue> {
        self.ensure_processing()?;
        self.check_column_index(column_index)?;
        self.check_row_index(row_index)?;
        Ok(&self.rows[row_index][column_index])
    }

    /// The cached column vector for a named column
    pub fn column(&self, column_name: &str) -> SqwrlResult<&[ResultValue]> {
        let column_index = self.column_index(column_name)?;
        self.column_at(column_index)
    }

    /// The cached column vector at a column index
    pub fn column_at(&self, column_index: usize) -> SqwrlResult<&[ResultValue]> {
        self.ensure_processing()?;
        self.check_column_index(column_index)?;
        let (_, values) = self
            .column_values
            .get_index(column_index)
            .ok_or_else(|| SqwrlError::invalid_column_index(column_index))?;
        Ok(values)
    }

    // ========================================================================
    // Processing phase: typed accessors and kind predicates
    // ========================================================================

    /// The current row's individual value in the named column
    pub fn object_value(&self, column_name: &str) -> SqwrlResult<&Iri> {
        match self.value(column_name)? {
            ResultValue::Individual(iri) => Ok(iri),
            other => Err(invalid_column_type("ObjectValue", column_name, other)),
        }
    }

    /// The current row's class value in the named column
    pub fn class_value(&self, column_name: &str) -> SqwrlResult<&Iri> {
        match self.value(column_name)? {
            ResultValue::Class(iri) => Ok(iri),
            other => Err(invalid_column_type("ClassValue", column_name, other)),
        }
    }

    /// The current row's property value in the named column
    pub fn property_value(&self, column_name: &str) -> SqwrlResult<&Iri> {
        match self.value(column_name)? {
            ResultValue::Property(iri) => Ok(iri),
            other => Err(invalid_column_type("PropertyValue", column_name, other)),
        }
    }

    /// The current row's literal value in the named column
    pub fn literal_value(&self, column_name: &str) -> SqwrlResult<&Literal> {
        match self.value(column_name)? {
            ResultValue::Literal(value) => Ok(value),
            other => Err(invalid_column_type("LiteralValue", column_name, other)),
        }
    }

    pub fn has_object_value(&self, column_name: &str) -> SqwrlResult<bool> {
        Ok(self.value(column_name)?.is_individual())
    }

    pub fn has_class_value(&self, column_name: &str) -> SqwrlResult<bool> {
        Ok(self.value(column_name)?.is_class())
    }

    pub fn has_property_value(&self, column_name: &str) -> SqwrlResult<bool> {
        Ok(self.value(column_name)?.is_property())
    }

    pub fn has_literal_value(&self, column_name: &str) -> SqwrlResult<bool> {
        Ok(self.value(column_name)?.is_literal())
    }

    // ========================================================================
    // Prepare pipeline
    // ========================================================================

    /// Group rows by the selected-column tuple and reduce the aggregate
    /// columns within each group; group order is first-seen
    fn aggregate(&self, source: Vec<Row>) -> SqwrlResult<Vec<Row>> {
        let mut groups: Vec<Row> = Vec::new();
        let mut accumulators: Vec<IndexMap<usize, Vec<ResultValue>>> = Vec::new();

        for row in source {
            match self.find_group(&groups, &row)? {
                Some(group_index) => {
                    for column_index in self.aggregate_columns.keys() {
                        if let Some(values) = accumulators[group_index].get_mut(column_index) {
                            values.push(row[*column_index].clone());
                        }
                    }
                }
                None => {
                    let mut accumulator = IndexMap::new();
                    for column_index in self.aggregate_columns.keys() {
                        accumulator.insert(*column_index, vec![row[*column_index].clone()]);
                    }
                    accumulators.push(accumulator);
                    groups.push(row);
                }
            }
        }

        for (group_index, row) in groups.iter_mut().enumerate() {
            for (column_index, function) in &self.aggregate_columns {
                let values = &accumulators[group_index][column_index];
                row[*column_index] = reduce_aggregate(*function, values)?;
            }
        }

        Ok(groups)
    }

    /// Find the group whose selected-column values equal this row's, by the
    /// value total order
    fn find_group(&self, groups: &[Row], row: &Row) -> SqwrlResult<Option<usize>> {
        'candidates: for (group_index, candidate) in groups.iter().enumerate() {
            for column_index in &self.selected_column_indexes {
                if row[*column_index].compare(&candidate[*column_index])? != Ordering::Equal {
                    continue 'candidates;
                }
            }
            return Ok(Some(group_index));
        }
        Ok(None)
    }

    /// Stable sort by the declared order-by columns in declaration order
    fn order_by(&self, rows: &mut [Row]) -> SqwrlResult<()> {
        let mut comparison_error: Option<SqwrlError> = None;

        rows.sort_by(|a, b| {
            if comparison_error.is_some() {
                return Ordering::Equal;
            }
            for column_index in &self.order_by_columns {
                match a[*column_index].compare(&b[*column_index]) {
                    Ok(Ordering::Equal) => continue,
                    Ok(ordering) => {
                        return if self.is_ascending {
                            ordering
                        } else {
                            ordering.reverse()
                        }
                    }
                    Err(error) => {
                        comparison_error = Some(error);
                        return Ordering::Equal;
                    }
                }
            }
            Ordering::Equal
        });

        match comparison_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Apply the selection operators
    ///
    /// `limit` short-circuits all others; otherwise every enabled operator
    /// contributes its rows, concatenated in fixed order. Indices are
    /// 1-based and clamped up to 1.
    fn apply_selection_operators(&self, rows: Vec<Row>) -> Vec<Row> {
        let selection = &self.selection;
        if !selection.any_enabled() {
            return rows;
        }

        let n = rows.len();

        if let Some(limit) = selection.limit {
            let k = clamp_to_one(limit).min(n);
            return rows.into_iter().take(k).collect();
        }

        let mut output: Vec<Row> = Vec::new();

        if let Some(nth) = selection.nth {
            let i = clamp_to_one(nth);
            if i <= n {
                output.push(rows[i - 1].clone());
            }
        }

        if let Some(nth) = selection.not_nth {
            let i = clamp_to_one(nth);
            if i <= n {
                output.extend(
                    rows.iter()
                        .enumerate()
                        .filter(|(row_index, _)| *row_index != i - 1)
                        .map(|(_, row)| row.clone()),
                );
            } else {
                output.extend(rows.iter().cloned());
            }
        }

        if let Some(first) = selection.first {
            let i = clamp_to_one(first);
            output.extend(rows[..i.min(n)].iter().cloned());
        }

        if let Some(first) = selection.not_first {
            let i = clamp_to_one(first);
            if i <= n {
                output.extend(rows[i..].iter().cloned());
            } else {
                output.extend(rows.iter().cloned());
            }
        }

        if let Some(last) = selection.last {
            let i = clamp_to_one(last);
            if i <= n {
                output.extend(rows[n - i..].iter().cloned());
            } else {
                output.extend(rows.iter().cloned());
            }
        }

        if let Some(last) = selection.not_last {
            let i = clamp_to_one(last);
            if i <= n {
                output.extend(rows[..n - i].iter().cloned());
            } else {
                output.extend(rows.iter().cloned());
            }
        }

        if let Some((nth, slice_size)) = selection.nth_slice {
            let i = clamp_to_one(nth);
            let k = slice_size.max(0) as usize;
            if i <= n {
                output.extend(rows[i - 1..(i - 1 + k).min(n)].iter().cloned());
            }
        }

        if let Some((nth, slice_size)) = selection.not_nth_slice {
            let i = clamp_to_one(nth);
            let k = slice_size.max(0) as usize;
            if i <= n {
                output.extend(rows[..i - 1].iter().cloned());
                output.extend(rows[(i - 1 + k).min(n)..].iter().cloned());
            } else {
                output.extend(rows.iter().cloned());
            }
        }

        if let Some((nth, slice_size)) = selection.nth_last_slice {
            let i = clamp_to_one(nth);
            let k = slice_size.max(0) as usize;
            if i <= n {
                output.extend(rows[i..(i + k).min(n)].iter().cloned());
            }
        }

        if let Some((nth, slice_size)) = selection.not_nth_last_slice {
            let i = clamp_to_one(nth);
            let k = slice_size.max(0) as usize;
            if i <= n {
                output.extend(rows[..i].iter().cloned());
                output.extend(rows[(i + k).min(n)..].iter().cloned());
            } else {
                output.extend(rows.iter().cloned());
            }
        }

        output
    }

    /// Build the name-to-column-values map read by `column`
    fn prepare_column_vectors(&mut self) {
        self.column_values.clear();
        for column_index in 0..self.all_column_names.len() {
            let name = self.effective_column_name(column_index).to_string();
            let values = self
                .rows
                .iter()
                .map(|row| row[column_index].clone())
                .collect();
            self.column_values.insert(name, values);
        }
    }

    // ========================================================================
    // Guards and lookups
    // ========================================================================

    fn effective_column_name(&self, column_index: usize) -> &str {
        if column_index < self.column_display_names.len() {
            &self.column_display_names[column_index]
        } else {
            &self.all_column_names[column_index]
        }
    }

    fn column_index(&self, column_name: &str) -> SqwrlResult<usize> {
        self.all_column_names
            .iter()
            .position(|name| name == column_name)
            .or_else(|| {
                self.column_display_names
                    .iter()
                    .position(|name| name == column_name)
            })
            .ok_or_else(|| SqwrlError::invalid_column_name(column_name))
    }

    fn ensure_configuring(&self) -> SqwrlResult<()> {
        match self.phase {
            ResultPhase::Configuring => Ok(()),
            _ => Err(SqwrlError::result_state(
                "attempt to configure already configured result",
            )),
        }
    }

    fn ensure_configured(&self) -> SqwrlResult<()> {
        match self.phase {
            ResultPhase::Configuring => Err(SqwrlError::result_state(
                "attempt to access unconfigured result",
            )),
            _ => Ok(()),
        }
    }

    fn ensure_preparing(&self) -> SqwrlResult<()> {
        match self.phase {
            ResultPhase::Configuring => Err(SqwrlError::result_state(
                "attempt to add data to unconfigured result",
            )),
            ResultPhase::Preparing => Ok(()),
            ResultPhase::Processing => {
                Err(SqwrlError::result_state("attempt to modify prepared result"))
            }
        }
    }

    fn ensure_processing(&self) -> SqwrlResult<()> {
        match self.phase {
            ResultPhase::Processing => Ok(()),
            _ => Err(SqwrlError::result_state("attempt to process unprepared result")),
        }
    }

    fn check_not_at_end(&self) -> SqwrlResult<()> {
        if self.cursor >= 0 && (self.cursor as usize) < self.rows.len() {
            Ok(())
        } else {
            Err(SqwrlError::result_state(
                "attempt to get data after end of result reached",
            ))
        }
    }

    fn check_column_index(&self, column_index: usize) -> SqwrlResult<()> {
        if column_index < self.all_column_names.len() {
            Ok(())
        } else {
            Err(SqwrlError::invalid_column_index(column_index))
        }
    }

    fn check_row_index(&self, row_index: usize) -> SqwrlResult<()> {
        if row_index < self.rows.len() {
            Ok(())
        } else {
            Err(SqwrlError::invalid_row_index(row_index))
        }
    }
}

impl Default for QueryResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = (0..self.all_column_names.len())
            .map(|index| self.effective_column_name(index))
            .collect();
        writeln!(f, "[{}]", names.join(", "))?;
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn direction_name(ascending: bool) -> &'static str {
    if ascending {
        "ascending"
    } else {
        "descending"
    }
}

fn clamp_to_one(n: i32) -> usize {
    if n < 1 {
        1
    } else {
        n as usize
    }
}

fn invalid_column_type(expected: &str, column_name: &str, found: &ResultValue) -> SqwrlError {
    SqwrlError::invalid_column_type(format!(
        "expecting {} type for column {}, got {}",
        expected, column_name, found
    ))
}

/// Remove duplicate rows by full-row equality, keeping first occurrences
fn distinct(rows: Vec<Row>) -> Vec<Row> {
    let mut unique: IndexSet<Row> = IndexSet::with_capacity(rows.len());
    for row in rows {
        unique.insert(row);
    }
    unique.into_iter().collect()
}

fn reduce_aggregate(
    function: AggregateFunction,
    values: &[ResultValue],
) -> SqwrlResult<ResultValue> {
    if values.is_empty() {
        return Err(SqwrlError::invalid_query(format!(
            "empty aggregate value list for {}",
            function
        )));
    }

    match function {
        AggregateFunction::Min => extremum(values, Ordering::Less, function),
        AggregateFunction::Max => extremum(values, Ordering::Greater, function),
        AggregateFunction::Sum => Ok(Literal::double(numeric_sum(values, function)?).into()),
        AggregateFunction::Avg => {
            let sum = numeric_sum(values, function)?;
            Ok(Literal::double(sum / values.len() as f64).into())
        }
        AggregateFunction::Count => Ok(Literal::int(values.len() as i32).into()),
        AggregateFunction::CountDistinct => {
            let unique: HashSet<&ResultValue> = values.iter().collect();
            Ok(Literal::int(unique.len() as i32).into())
        }
    }
}

fn extremum(
    values: &[ResultValue],
    keep: Ordering,
    function: AggregateFunction,
) -> SqwrlResult<ResultValue> {
    let mut best: Option<&ResultValue> = None;
    for value in values {
        check_numeric(value, function)?;
        best = match best {
            None => Some(value),
            Some(current) => {
                if value.compare(current)? == keep {
                    Some(value)
                } else {
                    Some(current)
                }
            }
        };
    }
    // values is non-empty, checked by the caller
    best.cloned()
        .ok_or_else(|| SqwrlError::invalid_query(format!("empty aggregate value list for {}", function)))
}

fn numeric_sum(values: &[ResultValue], function: AggregateFunction) -> SqwrlResult<f64> {
    let mut sum = 0.0;
    for value in values {
        check_numeric(value, function)?;
        match value.as_literal() {
            Some(literal) => sum += literal.as_double()?,
            None => return Err(non_numeric_error(value, function)),
        }
    }
    Ok(sum)
}

fn check_numeric(value: &ResultValue, function: AggregateFunction) -> SqwrlResult<()> {
    if value.is_numeric() {
        Ok(())
    } else {
        Err(non_numeric_error(value, function))
    }
}

fn non_numeric_error(value: &ResultValue, function: AggregateFunction) -> SqwrlError {
    SqwrlError::literal_type(format!(
        "attempt to use {} aggregate on non numeric value {}",
        function, value
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual(name: &str) -> ResultValue {
        ResultValue::individual(format!("http://example.org#{}", name))
    }

    fn int(value: i32) -> ResultValue {
        ResultValue::literal(Literal::int(value))
    }

    fn single_column_result(values: &[i32]) -> QueryResult {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.configured().unwrap();
        for value in values {
            result.add_row(vec![int(*value)]).unwrap();
        }
        result
    }

    fn collect_ints(result: &QueryResult) -> Vec<i32> {
        (0..result.number_of_rows().unwrap())
            .map(|row| {
                result
                    .cell(0, row)
                    .unwrap()
                    .as_literal()
                    .unwrap()
                    .as_int()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_aggregation_avg_by_group() {
        let mut result = QueryResult::new();
        result.add_column("name").unwrap();
        result.add_aggregate_column("age", "avg").unwrap();
        result.configured().unwrap();

        result.add_row(vec![individual("Fred"), int(27)]).unwrap();
        result.add_row(vec![individual("Joe"), int(34)]).unwrap();
        result.add_row(vec![individual("Joe"), int(21)]).unwrap();
        result.prepared().unwrap();

        assert_eq!(result.number_of_rows().unwrap(), 2);
        assert_eq!(
            result.cell(1, 0).unwrap().as_literal().unwrap().as_double().unwrap(),
            27.0
        );
        assert_eq!(
            result.cell(1, 1).unwrap().as_literal().unwrap().as_double().unwrap(),
            27.5
        );
    }

    #[test]
    fn test_count_aggregation_sums_to_row_count() {
        let mut result = QueryResult::new();
        result.add_column("name").unwrap();
        result.add_aggregate_column("n", "count").unwrap();
        result.configured().unwrap();

        for name in ["a", "a", "b", "c", "c", "c"] {
            result.add_row(vec![individual(name), int(0)]).unwrap();
        }
        result.prepared().unwrap();

        assert_eq!(result.number_of_rows().unwrap(), 3);
        let total: i32 = (0..3)
            .map(|row| {
                result
                    .cell(1, row)
                    .unwrap()
                    .as_literal()
                    .unwrap()
                    .as_int()
                    .unwrap()
            })
            .sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_count_distinct() {
        let mut result = QueryResult::new();
        result.add_column("name").unwrap();
        result
            .add_aggregate_column("ages", "count-distinct")
            .unwrap();
        result.configured().unwrap();

        result.add_row(vec![individual("a"), int(1)]).unwrap();
        result.add_row(vec![individual("a"), int(1)]).unwrap();
        result.add_row(vec![individual("a"), int(2)]).unwrap();
        result.prepared().unwrap();

        assert_eq!(
            result.cell(1, 0).unwrap().as_literal().unwrap().as_int().unwrap(),
            2
        );
    }

    #[test]
    fn test_min_max_sum() {
        let mut result = QueryResult::new();
        result.add_column("g").unwrap();
        result.add_aggregate_column("lo", "min").unwrap();
        result.add_aggregate_column("hi", "max").unwrap();
        result.add_aggregate_column("total", "sum").unwrap();
        result.configured().unwrap();

        for value in [4, 2, 9] {
            result
                .add_row(vec![individual("g"), int(value), int(value), int(value)])
                .unwrap();
        }
        result.prepared().unwrap();

        assert_eq!(result.cell(1, 0).unwrap(), &int(2));
        assert_eq!(result.cell(2, 0).unwrap(), &int(9));
        assert_eq!(
            result.cell(3, 0).unwrap().as_literal().unwrap().as_double().unwrap(),
            15.0
        );
    }

    #[test]
    fn test_invalid_aggregate_function_name() {
        let mut result = QueryResult::new();
        let err = result.add_aggregate_column("x", "median").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidAggregateFunction);
    }

    #[test]
    fn test_aggregate_function_name_is_case_insensitive() {
        assert_eq!(
            AggregateFunction::parse("AVG").unwrap(),
            AggregateFunction::Avg
        );
        assert_eq!(
            AggregateFunction::parse("CountDistinct").unwrap(),
            AggregateFunction::CountDistinct
        );
    }

    #[test]
    fn test_non_numeric_value_rejected_at_add_time() {
        let mut result = QueryResult::new();
        result.add_column("name").unwrap();
        result.add_aggregate_column("age", "avg").unwrap();
        result.configured().unwrap();

        result.open_row().unwrap();
        result.add_row_data(individual("Fred")).unwrap();
        let err = result
            .add_row_data(ResultValue::literal(Literal::string("young")))
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::LiteralType);
    }

    #[test]
    fn test_count_accepts_any_value() {
        let mut result = QueryResult::new();
        result.add_column("name").unwrap();
        result.add_aggregate_column("n", "count").unwrap();
        result.configured().unwrap();

        result
            .add_row(vec![individual("Fred"), individual("thing")])
            .unwrap();
        result.prepared().unwrap();
        assert_eq!(result.number_of_rows().unwrap(), 1);
    }

    #[test]
    fn test_distinct() {
        let mut result = QueryResult::new();
        result.add_column("name").unwrap();
        result.set_is_distinct().unwrap();
        result.configured().unwrap();

        for _ in 0..3 {
            result.add_row(vec![individual("same")]).unwrap();
        }
        result.prepared().unwrap();

        assert_eq!(result.number_of_rows().unwrap(), 1);
    }

    #[test]
    fn test_distinct_is_idempotent() {
        let rows = vec![vec![int(1)], vec![int(2)], vec![int(1)], vec![int(2)]];
        let once = distinct(rows.clone());
        let twice = distinct(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_order_by_ascending() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.add_order_by_column(0, true).unwrap();
        result.configured().unwrap();
        for value in [5, 1, 4, 2, 3] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();

        assert_eq!(collect_ints(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_order_by_descending_is_stable() {
        let mut result = QueryResult::new();
        result.add_column("k").unwrap();
        result.add_column("tag").unwrap();
        result.add_order_by_column(0, false).unwrap();
        result.configured().unwrap();

        result.add_row(vec![int(1), individual("first")]).unwrap();
        result.add_row(vec![int(2), individual("x")]).unwrap();
        result.add_row(vec![int(1), individual("second")]).unwrap();
        result.prepared().unwrap();

        // Equal keys keep their input order
        assert_eq!(result.cell(1, 1).unwrap(), &individual("first"));
        assert_eq!(result.cell(1, 2).unwrap(), &individual("second"));
    }

    #[test]
    fn test_order_by_direction_conflict() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        result.add_column("b").unwrap();
        result.add_order_by_column(0, true).unwrap();
        let err = result.add_order_by_column(1, false).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidQuery);
    }

    #[test]
    fn test_order_by_index_out_of_range() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        let err = result.add_order_by_column(1, true).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidQuery);
    }

    #[test]
    fn test_limit() {
        let mut result = single_column_result(&[10, 20, 30, 40, 50]);
        // Too late: selection operators belong to the Configuring phase
        assert!(result.set_limit(3).is_err());

        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_limit(3).unwrap();
        result.configured().unwrap();
        for value in [10, 20, 30, 40, 50] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();

        assert_eq!(result.number_of_rows().unwrap(), 3);
        assert_eq!(collect_ints(&result), vec![10, 20, 30]);
    }

    #[test]
    fn test_nth_after_order_by() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.add_order_by_column(0, true).unwrap();
        result.set_nth(2).unwrap();
        result.configured().unwrap();
        for value in [50, 10, 40, 30, 20] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();

        // Exactly the row with the second smallest value
        assert_eq!(collect_ints(&result), vec![20]);
    }

    #[test]
    fn test_nth_clamps_to_one() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_nth(-2).unwrap();
        result.configured().unwrap();
        for value in [7, 8, 9] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();
        assert_eq!(collect_ints(&result), vec![7]);
    }

    #[test]
    fn test_not_nth_out_of_range_returns_all() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_not_nth(4).unwrap();
        result.configured().unwrap();
        for value in [1, 2, 3] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();
        assert_eq!(collect_ints(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_not_nth_removes_row() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_not_nth(2).unwrap();
        result.configured().unwrap();
        for value in [1, 2, 3] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();
        assert_eq!(collect_ints(&result), vec![1, 3]);
    }

    #[test]
    fn test_first_and_last() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_first(2).unwrap();
        result.set_last(2).unwrap();
        result.configured().unwrap();
        for value in [1, 2, 3, 4, 5] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();

        // Both operators contribute, concatenated in fixed order
        assert_eq!(collect_ints(&result), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_not_first_and_not_last() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_not_first(2).unwrap();
        result.configured().unwrap();
        for value in [1, 2, 3, 4] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();
        assert_eq!(collect_ints(&result), vec![3, 4]);

        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.set_not_last(3).unwrap();
        result.configured().unwrap();
        for value in [1, 2, 3, 4] {
            result.add_row(vec![int(value)]).unwrap();
        }
        result.prepared().unwrap();
        assert_eq!(collect_ints(&result), vec![1]);
    }

    #[test]
    fn test_slices() {
        let build = |configure: &dyn Fn(&mut QueryResult)| {
            let mut result = QueryResult::new();
            result.add_column("n").unwrap();
            configure(&mut result);
            result.configured().unwrap();
            for value in [1, 2, 3, 4, 5] {
                result.add_row(vec![int(value)]).unwrap();
            }
            result.prepared().unwrap();
            collect_ints(&result)
        };

        assert_eq!(
            build(&|r| r.set_nth_slice(2, 2).unwrap()),
            vec![2, 3]
        );
        assert_eq!(
            build(&|r| r.set_not_nth_slice(2, 2).unwrap()),
            vec![1, 4, 5]
        );
        assert_eq!(
            build(&|r| r.set_nth_last_slice(2, 2).unwrap()),
            vec![3, 4]
        );
        assert_eq!(
            build(&|r| r.set_not_nth_last_slice(2, 2).unwrap()),
            vec![1, 2, 5]
        );
        // Slice reaching past the end is truncated
        assert_eq!(
            build(&|r| r.set_nth_slice(4, 10).unwrap()),
            vec![4, 5]
        );
        // Out-of-range n falls back per operator
        assert_eq!(build(&|r| r.set_nth_slice(6, 2).unwrap()), Vec::<i32>::new());
        assert_eq!(
            build(&|r| r.set_not_nth_slice(6, 2).unwrap()),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_phase_violations() {
        // addRowData before configured()
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        let err = result.add_row_data(int(1)).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ResultState);

        // addColumn after configured()
        result.configured().unwrap();
        let err = result.add_column("m").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ResultState);

        // getValue before prepared()
        let err = result.value("n").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ResultState);
    }

    #[test]
    fn test_double_configured_fails() {
        let mut result = QueryResult::new();
        result.add_column("n").unwrap();
        result.configured().unwrap();
        let err = result.configured().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ResultState);
    }

    #[test]
    fn test_row_auto_close() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        result.add_column("b").unwrap();
        result.configured().unwrap();

        result.open_row().unwrap();
        result.add_row_data(int(1)).unwrap();
        result.add_row_data(int(2)).unwrap();
        // Row closed automatically after the second value
        assert!(!result.is_row_open());
        result.prepared().unwrap();
        assert_eq!(result.number_of_rows().unwrap(), 1);
    }

    #[test]
    fn test_prepared_with_partial_row_fails() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        result.add_column("b").unwrap();
        result.configured().unwrap();

        result.open_row().unwrap();
        result.add_row_data(int(1)).unwrap();
        let err = result.prepared().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ResultState);
    }

    #[test]
    fn test_prepared_with_open_empty_row_succeeds() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        result.configured().unwrap();
        result.open_row().unwrap();
        result.prepared().unwrap();
        assert_eq!(result.number_of_rows().unwrap(), 0);
    }

    #[test]
    fn test_cursor_iteration_and_reset() {
        let mut result = single_column_result(&[1, 2]);
        result.prepared().unwrap();

        let mut seen = Vec::new();
        while result.has_next().unwrap() {
            seen.push(result.value_at(0).unwrap().clone());
            result.next().unwrap();
        }
        assert_eq!(seen, vec![int(1), int(2)]);

        let err = result.next().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ResultState);

        result.reset().unwrap();
        assert!(result.has_next().unwrap());
    }

    #[test]
    fn test_empty_result_cursor() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        result.configured().unwrap();
        result.prepared().unwrap();

        assert!(result.is_empty().unwrap());
        assert!(!result.has_next().unwrap());
    }

    #[test]
    fn test_column_vectors() {
        let mut result = single_column_result(&[3, 1]);
        result.prepared().unwrap();

        let column = result.column("n").unwrap();
        assert_eq!(column, &[int(3), int(1)]);
        assert_eq!(result.column_at(0).unwrap().len(), 2);

        let err = result.column("missing").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidColumnName);
    }

    #[test]
    fn test_display_names() {
        let mut result = QueryResult::new();
        result.add_column("x").unwrap();
        result.add_column("y").unwrap();
        result.add_column_display_name("first").unwrap();
        result.configured().unwrap();

        assert_eq!(result.column_name(0).unwrap(), "first");
        assert_eq!(result.column_name(1).unwrap(), "y");
        assert_eq!(
            result.column_names().unwrap(),
            vec!["first".to_string(), "y".to_string()]
        );
    }

    #[test]
    fn test_display_name_validation() {
        let mut result = QueryResult::new();
        assert!(result.add_column_display_name("").is_err());
        assert!(result.add_column_display_name("a,b").is_err());
    }

    #[test]
    fn test_typed_accessors() {
        let mut result = QueryResult::new();
        result.add_column("who").unwrap();
        result.add_column("age").unwrap();
        result.configured().unwrap();
        result.add_row(vec![individual("fred"), int(27)]).unwrap();
        result.prepared().unwrap();

        assert_eq!(
            result.object_value("who").unwrap().as_str(),
            "http://example.org#fred"
        );
        assert_eq!(result.literal_value("age").unwrap().as_int().unwrap(), 27);
        assert!(result.has_object_value("who").unwrap());
        assert!(!result.has_class_value("who").unwrap());

        let err = result.class_value("who").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidColumnType);
    }

    #[test]
    fn test_cell_random_access_checks() {
        let mut result = single_column_result(&[1]);
        result.prepared().unwrap();

        assert_eq!(result.cell(0, 0).unwrap(), &int(1));
        assert_eq!(
            result.cell(5, 0).unwrap_err().code,
            crate::error::ErrorCode::InvalidColumnIndex
        );
        assert_eq!(
            result.cell(0, 5).unwrap_err().code,
            crate::error::ErrorCode::InvalidRowIndex
        );
    }

    #[test]
    fn test_add_row_arity_check() {
        let mut result = QueryResult::new();
        result.add_column("a").unwrap();
        result.add_column("b").unwrap();
        result.configured().unwrap();
        assert!(result.add_row(vec![int(1)]).is_err());
    }

    #[test]
    fn test_incomparable_order_by_fails_at_prepare() {
        let mut result = QueryResult::new();
        result.add_column("v").unwrap();
        result.add_order_by_column(0, true).unwrap();
        result.configured().unwrap();
        result.add_row(vec![int(1)]).unwrap();
        result
            .add_row(vec![ResultValue::literal(Literal::string("x"))])
            .unwrap();

        let err = result.prepared().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::LiteralType);
    }
}
