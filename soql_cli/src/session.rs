//! Session files: everything needed to rebuild a filter editor offline

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use soql_core::{
    Combinator, FieldDescriptor, FieldMetadata, LogicMode, Operator, OrderBy, PicklistOption,
};

use crate::errors::CliError;
use crate::ui;

/// Where a saved filter takes its value from instead of `value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueCriteria {
    #[serde(rename = "Fetch User State")]
    UserState,
    #[serde(rename = "Fetch User Country")]
    UserCountry,
    #[serde(rename = "Fetch User Postal Code")]
    UserPostalCode,
}

impl fmt::Display for ValueCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueCriteria::UserState => write!(f, "user state"),
            ValueCriteria::UserCountry => write!(f, "user country"),
            ValueCriteria::UserPostalCode => write!(f, "user postal code"),
        }
    }
}

/// Billing address of the running user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    #[serde(default)]
    pub billing_state: Option<String>,
    #[serde(default)]
    pub billing_country: Option<String>,
    #[serde(default)]
    pub billing_postal_code: Option<String>,
}

impl UserContext {
    pub fn resolve(&self, criteria: ValueCriteria) -> Option<&str> {
        let value = match criteria {
            ValueCriteria::UserState => &self.billing_state,
            ValueCriteria::UserCountry => &self.billing_country,
            ValueCriteria::UserPostalCode => &self.billing_postal_code,
        };
        value.as_deref()
    }
}

/// A filter row as saved in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    pub field: String,
    #[serde(default)]
    pub operator: Option<Operator>,
    /// Comma-separated for picklist rows
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub selected_values: Vec<String>,
    #[serde(default)]
    pub condition: Combinator,
    #[serde(default)]
    pub value_criteria: Option<ValueCriteria>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub object_type: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Picklist values served to rows whose field has none inline
    #[serde(default)]
    pub picklists: HashMap<String, Vec<PicklistOption>>,
    #[serde(default)]
    pub filters: Vec<SavedFilter>,
    #[serde(default)]
    pub logic: LogicMode,
    #[serde(default)]
    pub custom_logic: String,
    #[serde(default)]
    pub selected_fields: Vec<String>,
    #[serde(default)]
    pub order_by: Option<OrderBy>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub user_context: UserContext,
}

impl Session {
    pub fn metadata(&self) -> FieldMetadata {
        FieldMetadata::new(&self.object_type, self.fields.clone())
    }
}

/// Reads and parses a session file.
pub fn load_session(path: &Path) -> Result<Session, CliError> {
    ui::debug(&format!("Loading session from {}", path.display()));

    let contents = fs::read_to_string(path).map_err(|e| {
        ui::error_with_details(
            &format!("Failed to read session file {}", path.display()),
            &e.to_string(),
        );
        CliError::FileError
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        ui::error_with_details("Failed to parse session", &e.to_string());
        CliError::SessionError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_session(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_minimal_session() {
        let file = write_session(r#"{ "objectType": "Account" }"#);
        let session = load_session(file.path()).unwrap();

        assert_eq!(session.object_type, "Account");
        assert!(session.filters.is_empty());
        assert_eq!(session.logic, LogicMode::And);
        assert_eq!(session.limit, None);
    }

    #[test]
    fn test_load_full_session() {
        let file = write_session(
            r#"{
                "objectType": "Account",
                "fields": [
                    { "label": "Industry", "apiName": "Industry", "dataType": "PICKLIST" }
                ],
                "picklists": { "Industry": [ { "label": "Energy", "value": "Energy" } ] },
                "filters": [
                    { "field": "Industry", "operator": "=", "value": "Energy", "condition": "OR" }
                ],
                "logic": "Custom",
                "customLogic": "1",
                "selectedFields": ["Industry"],
                "orderBy": { "field": "Name", "direction": "DESC" },
                "limit": 50
            }"#,
        );
        let session = load_session(file.path()).unwrap();

        assert_eq!(session.fields.len(), 1);
        assert_eq!(session.filters[0].operator, Some(Operator::Equal));
        assert_eq!(session.filters[0].condition, Combinator::Or);
        assert_eq!(session.logic, LogicMode::Custom);
        assert_eq!(session.picklists["Industry"].len(), 1);
        assert_eq!(session.limit, Some(50));
        assert_eq!(session.metadata().lookup("Industry").unwrap().label, "Industry");
    }

    #[test]
    fn test_load_value_criteria() {
        let file = write_session(
            r#"{
                "objectType": "Account",
                "filters": [
                    { "field": "BillingState", "operator": "=", "valueCriteria": "Fetch User State" }
                ],
                "userContext": { "billingState": "CA" }
            }"#,
        );
        let session = load_session(file.path()).unwrap();

        let criteria = session.filters[0].value_criteria.unwrap();
        assert_eq!(criteria, ValueCriteria::UserState);
        assert_eq!(session.user_context.resolve(criteria), Some("CA"));
        assert_eq!(session.user_context.resolve(ValueCriteria::UserCountry), None);
    }

    #[test]
    fn test_unknown_value_criteria() {
        let file = write_session(
            r#"{
                "objectType": "Account",
                "filters": [ { "field": "BillingCity", "valueCriteria": "Fetch User City" } ]
            }"#,
        );
        assert_eq!(load_session(file.path()), Err(CliError::SessionError));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_session(&dir.path().join("missing.json"));
        assert_eq!(result, Err(CliError::FileError));
    }

    #[test]
    fn test_malformed_session() {
        let file = write_session(r#"{ "objectType": 42 }"#);
        assert_eq!(load_session(file.path()), Err(CliError::SessionError));
    }
}
