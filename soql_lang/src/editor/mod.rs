//! Filter editor: rows, logic mode and custom-logic validation together

mod validation;

pub use validation::ValidationState;

use log::{debug, info};
use soql_core::{
    Combinator, FieldMetadata, FilterRow, FilterRows, InvalidConditions, Joining, LogicError,
    LogicMode, Operator, PicklistRequest, PicklistResolution, ResolutionOutcome, RowError,
    WhereClause, build_where_clause,
};

use crate::custom_logic::check_custom_logic;

/// Owns the filter rows for one object type and turns them into a WHERE body
#[derive(Debug, Clone)]
pub struct FilterEditor {
    metadata: FieldMetadata,
    rows: FilterRows,
    mode: LogicMode,
    custom_expression: String,
    validation: ValidationState,
}

impl FilterEditor {
    pub fn new(metadata: FieldMetadata) -> Self {
        Self {
            metadata,
            rows: FilterRows::new(),
            mode: LogicMode::default(),
            custom_expression: String::new(),
            validation: ValidationState::Idle,
        }
    }

    pub fn metadata(&self) -> &FieldMetadata {
        &self.metadata
    }

    /// Switches to another object type, dropping every row
    pub fn set_metadata(&mut self, metadata: FieldMetadata) {
        debug!("Filter editor switched to {}", metadata.object_type);
        self.metadata = metadata;
        self.reset();
    }

    pub fn rows(&self) -> &FilterRows {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&FilterRow> {
        self.rows.get(index)
    }

    pub fn mode(&self) -> LogicMode {
        self.mode
    }

    pub fn custom_expression(&self) -> &str {
        &self.custom_expression
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn validation_message(&self) -> Option<&'static str> {
        self.validation.message()
    }

    pub fn add_row(&mut self) -> &FilterRow {
        self.validation = ValidationState::Idle;
        self.rows.add_row()
    }

    pub fn clear_row(&mut self, index: usize) -> Result<(), RowError> {
        self.rows.clear_row(index)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), RowError> {
        self.rows.remove_row(index)?;
        self.validation = ValidationState::Idle;
        Ok(())
    }

    /// Points a row at a field of the current object type.
    ///
    /// A returned request must be resolved by the caller and handed back
    /// through [`FilterEditor::apply_picklist`].
    pub fn on_field_change(
        &mut self,
        index: usize,
        field: &str,
    ) -> Result<Option<PicklistRequest>, RowError> {
        self.rows.on_field_change(index, field, &self.metadata)
    }

    pub fn set_operator(&mut self, index: usize, operator: Operator) -> Result<(), RowError> {
        self.rows.set_operator(index, operator)
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<(), RowError> {
        self.rows.set_value(index, value)
    }

    pub fn set_selected_values(
        &mut self,
        index: usize,
        values: Vec<String>,
    ) -> Result<(), RowError> {
        self.rows.set_selected_values(index, values)
    }

    pub fn set_condition(&mut self, index: usize, condition: Combinator) -> Result<(), RowError> {
        self.rows.set_condition(index, condition)
    }

    pub fn apply_picklist(&mut self, resolution: PicklistResolution) -> ResolutionOutcome {
        self.rows.apply_picklist(resolution)
    }

    pub fn set_mode(&mut self, mode: LogicMode) {
        if self.mode != mode {
            debug!("Filter logic mode changed from {} to {}", self.mode, mode);
            self.mode = mode;
            self.validation = ValidationState::Idle;
        }
    }

    /// Replaces the custom expression; validation returns to idle
    pub fn set_custom_expression(&mut self, expression: impl Into<String>) {
        self.custom_expression = expression.into();
        self.validation = ValidationState::Idle;
    }

    /// Checks the custom expression against the current rows
    pub fn validate(&mut self) -> &ValidationState {
        self.validation = match check_custom_logic(&self.custom_expression, self.rows.len()) {
            Ok(_) => ValidationState::Valid,
            Err(error) => ValidationState::Invalid(error),
        };
        &self.validation
    }

    /// Compiles the complete rows with the current logic mode.
    ///
    /// With no complete rows the clause is empty in every mode. Otherwise, in
    /// custom mode an invalid expression produces no clause; the error is
    /// kept as the validation state and returned.
    pub fn generate(&mut self) -> Result<WhereClause, LogicError> {
        let clause = match self.mode {
            LogicMode::And => build_where_clause(&self.rows, Joining::Uniform(Combinator::And))?,
            LogicMode::Or => build_where_clause(&self.rows, Joining::Uniform(Combinator::Or))?,
            LogicMode::PerRow => build_where_clause(&self.rows, Joining::PerRow)?,
            LogicMode::Custom => self.generate_custom()?,
        };

        info!(
            "Generated {} filter ({} rows): {}",
            self.mode,
            self.rows.len(),
            clause.to_clause().unwrap_or_else(|| "no conditions".to_string())
        );
        Ok(clause)
    }

    fn generate_custom(&mut self) -> Result<WhereClause, LogicError> {
        if self.rows.complete_rows().next().is_none() {
            self.validation = ValidationState::Idle;
            return Ok(WhereClause::empty());
        }

        let result = check_custom_logic(&self.custom_expression, self.rows.len())
            .and_then(|expr| build_where_clause(&self.rows, Joining::Custom(&expr)));

        match result {
            Ok(clause) => {
                self.validation = ValidationState::Valid;
                Ok(clause)
            }
            Err(error) => {
                debug!("Custom logic rejected: {}", error);
                self.validation = ValidationState::Invalid(error.clone());
                Err(error)
            }
        }
    }

    /// Re-asserts the custom-logic error after the query was rejected.
    ///
    /// Outside custom mode there is nothing to report. An expression that
    /// still validates is marked as rejected.
    pub fn throw_error(&mut self) -> Option<LogicError> {
        if self.mode != LogicMode::Custom {
            return None;
        }

        let error = match check_custom_logic(&self.custom_expression, self.rows.len()) {
            Err(error) => error,
            Ok(_) => LogicError::InvalidConditions(InvalidConditions::Rejected),
        };
        self.validation = ValidationState::Invalid(error.clone());
        Some(error)
    }

    /// Handles a failed query execution. Messages mentioning `AND` or `OR`
    /// are blamed on the custom expression.
    pub fn on_query_failure(&mut self, message: &str) -> Option<LogicError> {
        if message.contains("AND") || message.contains("OR") {
            self.throw_error()
        } else {
            None
        }
    }

    /// Back to a single blank row joined with AND
    pub fn reset(&mut self) {
        self.rows.reset();
        self.mode = LogicMode::And;
        self.custom_expression.clear();
        self.validation = ValidationState::Idle;
    }
}
