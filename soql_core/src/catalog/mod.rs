//! Static data-type policies and the operator catalog

mod operator;

pub use operator::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised when catalog lookups receive unknown names
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    UnknownDataType(String),
    UnknownOperator(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownDataType(name) => write!(f, "Unknown data type '{}'", name),
            CatalogError::UnknownOperator(token) => write!(f, "Unknown operator '{}'", token),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Field data types reported by the describe collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    String,
    Picklist,
    Url,
    Email,
    TextArea,
    Reference,
    Phone,
    Date,
    DateTime,
    Currency,
    Double,
    Boolean,
    Int,
    Address,
}

impl DataType {
    /// Every data type the catalog knows. See [`DataType::is_filterable`]
    /// for the ones offered in the field picker.
    pub const ALL: [DataType; 14] = [
        DataType::String,
        DataType::Picklist,
        DataType::Url,
        DataType::Email,
        DataType::TextArea,
        DataType::Reference,
        DataType::Phone,
        DataType::Date,
        DataType::DateTime,
        DataType::Currency,
        DataType::Double,
        DataType::Boolean,
        DataType::Int,
        DataType::Address,
    ];

    /// Long text areas cannot appear in a WHERE clause
    pub fn is_filterable(&self) -> bool {
        !matches!(self, DataType::TextArea)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Picklist => "Picklist",
            DataType::Url => "Url",
            DataType::Email => "Email",
            DataType::TextArea => "TextArea",
            DataType::Reference => "Reference",
            DataType::Phone => "Phone",
            DataType::Date => "Date",
            DataType::DateTime => "DateTime",
            DataType::Currency => "Currency",
            DataType::Double => "Double",
            DataType::Boolean => "Boolean",
            DataType::Int => "Int",
            DataType::Address => "Address",
        }
    }

    /// Returns the input and compilation policy for this data type
    pub fn policy(&self) -> FieldTypePolicy {
        let (input_kind, requires_quoting, handling) = match self {
            DataType::String
            | DataType::Url
            | DataType::Email
            | DataType::TextArea
            | DataType::Reference
            | DataType::Phone => (InputKind::Text, true, ValueHandling::Scalar),
            DataType::Picklist => (InputKind::Text, true, ValueHandling::Picklist),
            DataType::Date => (InputKind::Date, false, ValueHandling::Scalar),
            DataType::DateTime => (InputKind::DateTime, false, ValueHandling::Scalar),
            DataType::Currency | DataType::Double | DataType::Int => {
                (InputKind::Number, false, ValueHandling::Scalar)
            }
            DataType::Boolean => (InputKind::Checkbox, false, ValueHandling::Boolean),
            DataType::Address => (InputKind::None, false, ValueHandling::Scalar),
        };

        FieldTypePolicy {
            input_kind,
            requires_quoting,
            handling,
        }
    }

    /// Operators from the catalog that apply to this data type, in catalog order
    pub fn operators(&self) -> Vec<Operator> {
        operators_for(*self)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = CatalogError;

    /// Accepts both the UI names ("DateTime") and the upper-case describe
    /// names ("DATETIME", "INTEGER", "ID").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let data_type = match normalized.as_str() {
            "string" => DataType::String,
            "picklist" => DataType::Picklist,
            "url" => DataType::Url,
            "email" => DataType::Email,
            "textarea" => DataType::TextArea,
            "reference" | "id" => DataType::Reference,
            "phone" => DataType::Phone,
            "date" => DataType::Date,
            "datetime" => DataType::DateTime,
            "currency" => DataType::Currency,
            "double" => DataType::Double,
            "boolean" => DataType::Boolean,
            "int" | "integer" => DataType::Int,
            "address" => DataType::Address,
            _ => return Err(CatalogError::UnknownDataType(s.to_string())),
        };
        Ok(data_type)
    }
}

impl TryFrom<String> for DataType {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.as_str().to_string()
    }
}

/// The input widget a row shows for its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Date,
    DateTime,
    Checkbox,
    None,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::DateTime => "datetime",
            InputKind::Checkbox => "checkbox",
            InputKind::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// How a row's value is held and compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueHandling {
    /// A single typed-in value
    Scalar,
    /// A set of values chosen from fetched candidates
    Picklist,
    /// A fixed true/false choice
    Boolean,
}

/// Per data-type input and compilation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypePolicy {
    pub input_kind: InputKind,
    pub requires_quoting: bool,
    pub handling: ValueHandling,
}

impl FieldTypePolicy {
    /// False for picklist and boolean types, which compile to dedicated shapes
    pub fn is_plain_scalar(&self) -> bool {
        self.handling == ValueHandling::Scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ui_names() {
        for data_type in DataType::ALL {
            assert_eq!(data_type.as_str().parse::<DataType>().unwrap(), data_type);
        }
    }

    #[test]
    fn test_parse_describe_names() {
        assert_eq!("STRING".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("INTEGER".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("ID".parse::<DataType>().unwrap(), DataType::Reference);
        assert_eq!("DATETIME".parse::<DataType>().unwrap(), DataType::DateTime);
    }

    #[test]
    fn test_parse_unknown() {
        let result = "Base64".parse::<DataType>();
        assert_eq!(result, Err(CatalogError::UnknownDataType("Base64".to_string())));
    }

    #[test]
    fn test_text_like_types_require_quoting() {
        for data_type in [
            DataType::String,
            DataType::Url,
            DataType::Email,
            DataType::TextArea,
            DataType::Reference,
            DataType::Phone,
        ] {
            let policy = data_type.policy();
            assert!(policy.requires_quoting, "{} should be quoted", data_type);
            assert_eq!(policy.input_kind, InputKind::Text);
            assert!(policy.is_plain_scalar());
        }
    }

    #[test]
    fn test_special_handling() {
        assert_eq!(DataType::Picklist.policy().handling, ValueHandling::Picklist);
        assert!(!DataType::Picklist.policy().is_plain_scalar());
        assert_eq!(DataType::Boolean.policy().handling, ValueHandling::Boolean);
        assert_eq!(DataType::Boolean.policy().input_kind, InputKind::Checkbox);
        assert!(!DataType::Boolean.policy().is_plain_scalar());
    }

    #[test]
    fn test_unquoted_types() {
        assert_eq!(DataType::Currency.policy().input_kind, InputKind::Number);
        assert_eq!(DataType::Date.policy().input_kind, InputKind::Date);
        assert_eq!(DataType::DateTime.policy().input_kind, InputKind::DateTime);
        assert_eq!(DataType::Address.policy().input_kind, InputKind::None);
        assert!(!DataType::Int.policy().requires_quoting);
        assert!(!DataType::Address.policy().requires_quoting);
    }

    #[test]
    fn test_text_area_not_filterable() {
        assert!(!DataType::TextArea.is_filterable());
        let filterable = DataType::ALL.iter().filter(|data_type| data_type.is_filterable()).count();
        assert_eq!(filterable, 13);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&DataType::DateTime).unwrap();
        assert_eq!(json, "\"DateTime\"");
        let parsed: DataType = serde_json::from_str("\"INTEGER\"").unwrap();
        assert_eq!(parsed, DataType::Int);
    }
}
