//! Filter row model
//!
//! Rows are held in display order and always number `1..=len`. The
//! collection never becomes empty: removing the last row blanks it instead.

mod fetch;

pub use fetch::*;

use log::{debug, warn};
use std::fmt;

use crate::catalog::{DataType, InputKind, Operator, ValueHandling, operators_for};
use crate::logic::Combinator;
use crate::metadata::{FieldDescriptor, FieldMetadata, PicklistOption};

/// Errors from row edits
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    IndexOutOfRange { index: usize, len: usize },
    /// The row has no resolved field type yet
    FieldNotResolved(usize),
    OperatorNotApplicable {
        operator: Operator,
        data_type: DataType,
    },
    NotAPicklist(usize),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::IndexOutOfRange { index, len } => {
                write!(f, "Row index {} is out of range ({} rows)", index, len)
            }
            RowError::FieldNotResolved(index) => {
                write!(f, "Row {} has no resolved field", index + 1)
            }
            RowError::OperatorNotApplicable {
                operator,
                data_type,
            } => {
                let supported: Vec<&str> =
                    operators_for(*data_type).iter().map(|op| op.token()).collect();
                write!(
                    f,
                    "Cannot use '{}' operator on {} fields. Supported: {}",
                    operator,
                    data_type,
                    supported.join(", ")
                )
            }
            RowError::NotAPicklist(index) => {
                write!(f, "Row {} is not a picklist row", index + 1)
            }
        }
    }
}

impl std::error::Error for RowError {}

/// Stable identity of a row, independent of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// Value state of a picklist row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PicklistState {
    pub options: Vec<PicklistOption>,
    pub selected_values: Vec<String>,
    /// Candidate values have arrived
    pub loaded: bool,
}

/// What kind of value a row holds, derived from its field's data type
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RowKind {
    /// No field chosen, or the field could not be resolved
    #[default]
    Unresolved,
    Scalar(DataType),
    Boolean,
    Picklist(PicklistState),
}

impl RowKind {
    fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
        let Some(data_type) = descriptor.resolved_type() else {
            return RowKind::Unresolved;
        };

        match data_type.policy().handling {
            ValueHandling::Scalar => RowKind::Scalar(data_type),
            ValueHandling::Boolean => RowKind::Boolean,
            ValueHandling::Picklist => {
                let options = descriptor.picklist_options.clone();
                RowKind::Picklist(PicklistState {
                    loaded: !options.is_empty(),
                    options,
                    selected_values: Vec::new(),
                })
            }
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            RowKind::Unresolved => None,
            RowKind::Scalar(data_type) => Some(*data_type),
            RowKind::Boolean => Some(DataType::Boolean),
            RowKind::Picklist(_) => Some(DataType::Picklist),
        }
    }
}

/// The fixed choices offered by boolean rows
pub fn boolean_options() -> Vec<PicklistOption> {
    vec![
        PicklistOption::new("True", "true"),
        PicklistOption::new("False", "false"),
    ]
}

/// One filter condition
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRow {
    id: RowId,
    generation: u64,
    sequence: usize,
    field: String,
    operator: Option<Operator>,
    value: String,
    condition: Combinator,
    kind: RowKind,
}

impl FilterRow {
    fn blank(id: RowId, sequence: usize) -> Self {
        Self {
            id,
            generation: 0,
            sequence,
            field: String::new(),
            operator: None,
            value: String::new(),
            condition: Combinator::default(),
            kind: RowKind::Unresolved,
        }
    }

    /// Resets input and derived state. The joiner is kept.
    fn clear(&mut self) {
        self.generation += 1;
        self.field.clear();
        self.operator = None;
        self.value.clear();
        self.kind = RowKind::Unresolved;
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn key(&self) -> RowKey {
        RowKey {
            id: self.id,
            generation: self.generation,
        }
    }

    /// 1-based position
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Joiner applied before this row in per-row mode
    pub fn condition(&self) -> Combinator {
        self.condition
    }

    pub fn kind(&self) -> &RowKind {
        &self.kind
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.kind.data_type()
    }

    pub fn field_type(&self) -> Option<InputKind> {
        self.data_type().map(|data_type| data_type.policy().input_kind)
    }

    pub fn show_picklist_input(&self) -> bool {
        matches!(self.kind, RowKind::Picklist(_))
    }

    pub fn show_boolean_input(&self) -> bool {
        matches!(self.kind, RowKind::Boolean)
    }

    pub fn operator_options(&self) -> Vec<Operator> {
        self.data_type().map(operators_for).unwrap_or_default()
    }

    pub fn options(&self) -> Vec<PicklistOption> {
        match &self.kind {
            RowKind::Boolean => boolean_options(),
            RowKind::Picklist(state) => state.options.clone(),
            _ => Vec::new(),
        }
    }

    pub fn selected_values(&self) -> &[String] {
        match &self.kind {
            RowKind::Picklist(state) => &state.selected_values,
            _ => &[],
        }
    }

    pub fn operator_disabled(&self) -> bool {
        matches!(self.kind, RowKind::Unresolved)
    }

    pub fn value_disabled(&self) -> bool {
        match &self.kind {
            RowKind::Unresolved => true,
            RowKind::Picklist(state) => !state.loaded,
            _ => false,
        }
    }

    /// Field, operator and at least one value are set
    pub fn is_complete(&self) -> bool {
        !self.field.is_empty()
            && self.operator.is_some()
            && (!self.value.is_empty() || !self.selected_values().is_empty())
    }
}

/// The ordered collection of filter rows
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRows {
    rows: Vec<FilterRow>,
    next_id: u64,
}

impl Default for FilterRows {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRows {
    /// Creates a collection holding a single blank row
    pub fn new() -> Self {
        Self {
            rows: vec![FilterRow::blank(RowId(0), 1)],
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FilterRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterRow> {
        self.rows.iter()
    }

    /// Complete rows paired with their 1-based position
    pub fn complete_rows(&self) -> impl Iterator<Item = (usize, &FilterRow)> {
        self.rows
            .iter()
            .filter(|row| row.is_complete())
            .map(|row| (row.sequence, row))
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut FilterRow, RowError> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(RowError::IndexOutOfRange { index, len })
    }

    /// Appends a blank row and returns it
    pub fn add_row(&mut self) -> &FilterRow {
        let id = self.allocate_id();
        let sequence = self.rows.len() + 1;
        self.rows.push(FilterRow::blank(id, sequence));
        debug!("Added filter row {}", sequence);
        &self.rows[sequence - 1]
    }

    pub fn clear_row(&mut self, index: usize) -> Result<(), RowError> {
        self.row_mut(index)?.clear();
        debug!("Cleared filter row {}", index + 1);
        Ok(())
    }

    /// Removes a row and renumbers the rest. The last remaining row is
    /// cleared in place instead.
    pub fn remove_row(&mut self, index: usize) -> Result<(), RowError> {
        if self.rows.len() == 1 {
            return self.clear_row(index);
        }

        let len = self.rows.len();
        if index >= len {
            return Err(RowError::IndexOutOfRange { index, len });
        }

        self.rows.remove(index);
        for (position, row) in self.rows.iter_mut().enumerate() {
            row.sequence = position + 1;
        }
        debug!("Removed filter row {}, {} remaining", index + 1, self.rows.len());
        Ok(())
    }

    /// Replaces every row with a single blank row
    pub fn reset(&mut self) {
        let id = self.allocate_id();
        self.rows = vec![FilterRow::blank(id, 1)];
    }

    /// Points a row at a new field and re-derives its kind.
    ///
    /// Returns a fetch request when the field is a picklist whose values are
    /// not known yet. An unknown field leaves the row cleared and unresolved.
    pub fn on_field_change(
        &mut self,
        index: usize,
        field: &str,
        metadata: &FieldMetadata,
    ) -> Result<Option<PicklistRequest>, RowError> {
        let row = self.row_mut(index)?;
        row.clear();
        row.field = field.to_string();

        let Some(descriptor) = metadata.lookup(field) else {
            debug!(
                "Field '{}' not found on {}; row {} left unresolved",
                field, metadata.object_type, row.sequence
            );
            return Ok(None);
        };

        row.kind = RowKind::from_descriptor(descriptor);
        debug!(
            "Row {} set to field '{}' ({})",
            row.sequence, field, descriptor.data_type
        );

        match &row.kind {
            RowKind::Picklist(state) if state.options.is_empty() => Ok(Some(
                PicklistRequest::new(row.key(), &metadata.object_type, field),
            )),
            _ => Ok(None),
        }
    }

    pub fn set_operator(&mut self, index: usize, operator: Operator) -> Result<(), RowError> {
        let row = self.row_mut(index)?;
        let data_type = row.data_type().ok_or(RowError::FieldNotResolved(index))?;

        if !operator.applies_to(data_type) {
            return Err(RowError::OperatorNotApplicable {
                operator,
                data_type,
            });
        }

        row.operator = Some(operator);
        Ok(())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<(), RowError> {
        self.row_mut(index)?.value = value.into();
        Ok(())
    }

    pub fn set_selected_values(
        &mut self,
        index: usize,
        values: Vec<String>,
    ) -> Result<(), RowError> {
        match &mut self.row_mut(index)?.kind {
            RowKind::Picklist(state) => {
                state.selected_values = values;
                Ok(())
            }
            _ => Err(RowError::NotAPicklist(index)),
        }
    }

    pub fn set_condition(&mut self, index: usize, condition: Combinator) -> Result<(), RowError> {
        self.row_mut(index)?.condition = condition;
        Ok(())
    }

    /// Stores fetched picklist values on the row the request was made for.
    ///
    /// A saved comma-separated value becomes the selection once the options
    /// arrive, unless values were already selected.
    pub fn apply_picklist(&mut self, resolution: PicklistResolution) -> ResolutionOutcome {
        let PicklistResolution { key, field, result } = resolution;

        let Some(row) = self.rows.iter_mut().find(|row| row.id == key.id) else {
            warn!("Discarding picklist values for '{}': row was removed", field);
            return ResolutionOutcome::Stale;
        };

        if row.generation != key.generation {
            warn!(
                "Discarding picklist values for '{}': row {} changed since the request",
                field, row.sequence
            );
            return ResolutionOutcome::Stale;
        }

        let options = match result {
            Ok(options) => options,
            Err(error) => {
                warn!("Row {}: {}", row.sequence, error);
                return ResolutionOutcome::Failed(error);
            }
        };

        let RowKind::Picklist(state) = &mut row.kind else {
            return ResolutionOutcome::Stale;
        };

        state.options = options;
        state.loaded = true;
        if state.selected_values.is_empty() && !row.value.is_empty() {
            state.selected_values = row
                .value
                .split(',')
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect();
        }

        debug!(
            "Row {} received {} picklist values for '{}'",
            row.sequence,
            state.options.len(),
            field
        );
        ResolutionOutcome::Applied
    }
}
