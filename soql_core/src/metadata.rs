//! Field metadata supplied by the describe collaborator

use serde::{Deserialize, Serialize};

use crate::catalog::DataType;

/// A candidate value for picklist rows (also used for the fixed boolean pair)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    pub label: String,
    pub value: String,
}

impl PicklistOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Describes a single field on the selected object type.
///
/// The data type is kept as reported so that fields with types outside the
/// catalog can still be listed and selected; they simply never resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub label: String,
    #[serde(alias = "value", alias = "apiName")]
    pub api_name: String,
    #[serde(alias = "dataType")]
    pub data_type: String,
    /// Picklist values known up front. When empty, picklist rows fetch them.
    #[serde(default, alias = "picklistOptions")]
    pub picklist_options: Vec<PicklistOption>,
}

impl FieldDescriptor {
    pub fn new(label: &str, api_name: &str, data_type: DataType) -> Self {
        Self {
            label: label.to_string(),
            api_name: api_name.to_string(),
            data_type: data_type.to_string(),
            picklist_options: Vec::new(),
        }
    }

    /// Attach picklist values known up front
    pub fn with_picklist_options(mut self, options: Vec<PicklistOption>) -> Self {
        self.picklist_options = options;
        self
    }

    /// Resolves the reported data type against the catalog
    pub fn resolved_type(&self) -> Option<DataType> {
        self.data_type.parse().ok()
    }
}

/// The fields of one object type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub object_type: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FieldMetadata {
    pub fn new(object_type: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            object_type: object_type.to_string(),
            fields,
        }
    }

    /// Looks up a field by API name
    pub fn lookup(&self, api_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.api_name == api_name)
    }

    /// Fields that may be used in filters, sorted by label
    pub fn filterable(&self) -> Vec<&FieldDescriptor> {
        let mut fields: Vec<&FieldDescriptor> = self
            .fields
            .iter()
            .filter(|field| {
                field
                    .resolved_type()
                    .is_some_and(|data_type| data_type.is_filterable())
            })
            .collect();
        fields.sort_by(|a, b| a.label.cmp(&b.label));
        fields
    }
}
