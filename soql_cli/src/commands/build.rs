//! Compiles a session's filter rows into a full query

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

use soql_core::{
    PicklistRequest, PicklistResolution, ResolutionOutcome, SoqlStatement, WhereClause,
};
use soql_lang::editor::FilterEditor;

use crate::errors::CliError;
use crate::session::{SavedFilter, Session, UserContext, load_session};
use crate::source::SessionPicklistSource;
use crate::ui::{self, OutputFormat};

/// The result of building a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildOutput {
    pub where_clause: WhereClause,
    pub soql: String,
}

/// Loads a session file and prints the query it describes.
pub fn build_query(session_path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Building query");
    let session = load_session(session_path)?;
    let output = compile_session(&session)?;

    if output.where_clause.has_conditions {
        ui::success(&format!("Compiled {} filter rows", session.filters.len()));
    } else {
        ui::info("No complete filter rows; the query is unconditional");
    }

    match output_format {
        OutputFormat::Pretty => ui::raw_output(&output.soql),
        OutputFormat::Json => ui::json_output(&output),
    }

    Ok(())
}

/// Replays the session's rows through a filter editor and renders the query.
pub fn compile_session(session: &Session) -> Result<BuildOutput, CliError> {
    let mut editor = FilterEditor::new(session.metadata());
    let requests = restore_filters(&mut editor, &session.filters, &session.user_context)?;

    if !requests.is_empty() {
        let source = SessionPicklistSource::new(session.picklists.clone());
        for resolution in fetch_picklists(requests, source)? {
            apply_resolution(&mut editor, resolution);
        }
    }

    editor.set_mode(session.logic);
    editor.set_custom_expression(session.custom_logic.as_str());

    let where_clause = editor.generate().map_err(|e| {
        ui::error_with_details(e.user_message(), &e.to_string());
        CliError::ValidationError
    })?;

    let soql = SoqlStatement::new(&session.object_type, session.selected_fields.clone())
        .with_where(where_clause.clone())
        .with_order_by(session.order_by.clone())
        .with_limit(session.limit)
        .render()
        .map_err(|e| {
            ui::error(&e.to_string());
            CliError::BuildError
        })?;

    Ok(BuildOutput { where_clause, soql })
}

/// Rebuilds one editor row per saved filter, returning the picklist fetches
/// the rows asked for.
fn restore_filters(
    editor: &mut FilterEditor,
    filters: &[SavedFilter],
    user_context: &UserContext,
) -> Result<Vec<PicklistRequest>, CliError> {
    let mut requests = Vec::new();

    for (index, filter) in filters.iter().enumerate() {
        if index > 0 {
            editor.add_row();
        }

        let row_error = |e: soql_core::RowError| {
            ui::error_with_details(&format!("Invalid filter row {}", index + 1), &e.to_string());
            CliError::InputError
        };

        if let Some(request) = editor.on_field_change(index, &filter.field).map_err(row_error)? {
            requests.push(request);
        }
        editor.set_condition(index, filter.condition).map_err(row_error)?;

        let resolved = editor
            .row(index)
            .is_some_and(|row| row.data_type().is_some());
        if !resolved {
            ui::warning(&format!(
                "Filter row {}: unknown field '{}', row left incomplete",
                index + 1,
                filter.field
            ));
            continue;
        }

        if let Some(operator) = filter.operator {
            editor.set_operator(index, operator).map_err(row_error)?;
        }
        editor
            .set_value(index, saved_value(index, filter, user_context))
            .map_err(row_error)?;
        if !filter.selected_values.is_empty() {
            editor
                .set_selected_values(index, filter.selected_values.clone())
                .map_err(row_error)?;
        }
    }

    Ok(requests)
}

/// The saved value, or the user's own value when the filter names one
fn saved_value<'a>(
    index: usize,
    filter: &'a SavedFilter,
    user_context: &'a UserContext,
) -> &'a str {
    let Some(criteria) = filter.value_criteria else {
        return &filter.value;
    };

    match user_context.resolve(criteria) {
        Some(value) => value,
        None => {
            ui::warning(&format!(
                "Filter row {}: no {} available, using the saved value",
                index + 1,
                criteria
            ));
            &filter.value
        }
    }
}

/// Resolves every request concurrently.
fn fetch_picklists(
    requests: Vec<PicklistRequest>,
    source: SessionPicklistSource,
) -> Result<Vec<PicklistResolution>, CliError> {
    ui::debug(&format!("Fetching picklist values for {} rows", requests.len()));

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        ui::error_with_details("Failed to create async runtime", &e.to_string());
        CliError::BuildError
    })?;

    rt.block_on(async {
        let source = Arc::new(source);
        let mut tasks = JoinSet::new();
        for request in requests {
            let source = Arc::clone(&source);
            tasks.spawn(async move { request.resolve(source.as_ref()).await });
        }

        let mut resolutions = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let resolution = joined.map_err(|e| {
                ui::error_with_details("Picklist fetch task failed", &e.to_string());
                CliError::BuildError
            })?;
            resolutions.push(resolution);
        }
        Ok::<_, CliError>(resolutions)
    })
}

fn apply_resolution(editor: &mut FilterEditor, resolution: PicklistResolution) {
    let field = resolution.field.clone();
    match editor.apply_picklist(resolution) {
        ResolutionOutcome::Applied => ui::debug(&format!("Loaded picklist values for {}", field)),
        ResolutionOutcome::Stale => ui::debug(&format!("Ignored stale values for {}", field)),
        ResolutionOutcome::Failed(e) => ui::warning(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ValueCriteria;
    use soql_core::{DataType, FieldDescriptor, LogicMode, Operator};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SESSION: &str = r#"{
        "objectType": "Account",
        "fields": [
            { "label": "Account Name", "apiName": "Name", "dataType": "STRING" },
            { "label": "Active", "apiName": "Active__c", "dataType": "BOOLEAN" },
            { "label": "Industry", "apiName": "Industry", "dataType": "PICKLIST" },
            { "label": "Employees", "apiName": "NumberOfEmployees", "dataType": "INTEGER" }
        ],
        "picklists": {
            "Industry": [
                { "label": "Energy", "value": "Energy" },
                { "label": "Retail", "value": "Retail" }
            ]
        },
        "filters": [
            { "field": "Name", "operator": "LIKE", "value": "Acme" },
            { "field": "Industry", "operator": "=", "value": "Energy,Retail" },
            { "field": "NumberOfEmployees", "operator": ">", "value": "50" }
        ],
        "selectedFields": ["Industry"],
        "limit": 25
    }"#;

    fn session() -> Session {
        serde_json::from_str(SESSION).unwrap()
    }

    #[test]
    fn test_compile_and_session() {
        let output = compile_session(&session()).unwrap();
        assert_eq!(
            output.where_clause.body,
            " Name LIKE '%Acme%' AND Industry IN ('Energy', 'Retail') AND NumberOfEmployees > 50"
        );
        assert_eq!(
            output.soql,
            "SELECT Id, Name, Industry FROM Account WHERE Name LIKE '%Acme%' AND Industry IN ('Energy', 'Retail') AND NumberOfEmployees > 50 LIMIT 25"
        );
    }

    #[test]
    fn test_compile_custom_session() {
        let mut session = session();
        session.logic = LogicMode::Custom;
        session.custom_logic = "(1 OR 2) AND NOT 3".to_string();

        let output = compile_session(&session).unwrap();
        assert_eq!(
            output.where_clause.body,
            " (Name LIKE '%Acme%' OR Industry IN ('Energy', 'Retail')) AND NOT NumberOfEmployees > 50"
        );
    }

    #[test]
    fn test_invalid_custom_logic_fails() {
        let mut session = session();
        session.logic = LogicMode::Custom;
        session.custom_logic = "1 AND 2".to_string();
        assert_eq!(compile_session(&session), Err(CliError::ValidationError));
    }

    #[test]
    fn test_missing_picklist_values_leave_row_incomplete() {
        let mut session = session();
        session.picklists.clear();
        session.filters[1].value.clear();

        let output = compile_session(&session).unwrap();
        assert_eq!(
            output.where_clause.body,
            " Name LIKE '%Acme%' AND NumberOfEmployees > 50"
        );
    }

    #[test]
    fn test_unknown_field_skipped() {
        let mut session = session();
        session.filters.push(SavedFilter {
            field: "Rating".to_string(),
            operator: Some(Operator::Equal),
            value: "Hot".to_string(),
            selected_values: Vec::new(),
            condition: Default::default(),
            value_criteria: None,
        });

        let output = compile_session(&session).unwrap();
        assert!(!output.where_clause.body.contains("Rating"));
    }

    #[test]
    fn test_value_from_user_context() {
        let mut session = session();
        session.fields.push(FieldDescriptor::new("Billing State", "BillingState", DataType::String));
        session.filters.push(SavedFilter {
            field: "BillingState".to_string(),
            operator: Some(Operator::Equal),
            value: "NY".to_string(),
            selected_values: Vec::new(),
            condition: Default::default(),
            value_criteria: Some(ValueCriteria::UserState),
        });
        session.user_context.billing_state = Some("CA".to_string());

        let output = compile_session(&session).unwrap();
        assert!(output.where_clause.body.ends_with(" AND BillingState = 'CA'"));

        session.user_context.billing_state = None;
        let output = compile_session(&session).unwrap();
        assert!(output.where_clause.body.ends_with(" AND BillingState = 'NY'"));
    }

    #[test]
    fn test_no_selected_fields() {
        let mut session = session();
        session.selected_fields.clear();
        assert_eq!(compile_session(&session), Err(CliError::BuildError));
    }

    #[test]
    fn test_build_query_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SESSION.as_bytes()).unwrap();
        assert_eq!(build_query(file.path(), OutputFormat::Json), Ok(()));
    }
}
