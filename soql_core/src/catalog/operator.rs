//! Comparison operators and the data types each applies to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{CatalogError, DataType};

/// Comparison operators offered in the filter editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    Like,
    NotLike,
}

impl Operator {
    /// The token written into the compiled clause
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessOrEqual => "<=",
            Operator::GreaterOrEqual => ">=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }

    /// The label shown in operator pickers
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equal => "Equals",
            Operator::NotEqual => "Not Equals",
            Operator::LessThan => "Less Than",
            Operator::GreaterThan => "Greater Than",
            Operator::LessOrEqual => "Less Than Or Equals",
            Operator::GreaterOrEqual => "Greater Than Or Equals",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }

    /// Checks whether the catalog allows this operator on a data type
    pub fn applies_to(&self, data_type: DataType) -> bool {
        OPERATOR_CATALOG
            .iter()
            .find(|entry| entry.operator == *self)
            .is_some_and(|entry| entry.types.contains(&data_type))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Operator {
    type Err = CatalogError;

    /// Parses a clause token. Saved filters may pad tokens with spaces or use
    /// the picklist forms `IN` / `NOT IN`, which map to equals / not equals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let operator = match normalized.to_ascii_uppercase().as_str() {
            "=" | "IN" => Operator::Equal,
            "!=" | "NOT IN" => Operator::NotEqual,
            "<" => Operator::LessThan,
            ">" => Operator::GreaterThan,
            "<=" => Operator::LessOrEqual,
            ">=" => Operator::GreaterOrEqual,
            "LIKE" => Operator::Like,
            "NOT LIKE" => Operator::NotLike,
            _ => return Err(CatalogError::UnknownOperator(s.to_string())),
        };
        Ok(operator)
    }
}

impl TryFrom<String> for Operator {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(value: Operator) -> Self {
        value.token().to_string()
    }
}

/// One catalog entry: an operator and the data types it is valid for
#[derive(Debug)]
pub struct OperatorEntry {
    pub operator: Operator,
    pub types: &'static [DataType],
}

const EQUALITY_TYPES: &[DataType] = &[
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

const ORDERED_TYPES: &[DataType] = &[
    DataType::Date,
    DataType::DateTime,
    DataType::Currency,
    DataType::Double,
    DataType::Int,
];

const PATTERN_TYPES: &[DataType] = &[
    DataType::String,
    DataType::Url,
    DataType::Email,
    DataType::Reference,
    DataType::Phone,
    DataType::Address,
];

/// The operator catalog. Declaration order is display order.
pub const OPERATOR_CATALOG: [OperatorEntry; 8] = [
    OperatorEntry { operator: Operator::Equal, types: EQUALITY_TYPES },
    OperatorEntry { operator: Operator::NotEqual, types: EQUALITY_TYPES },
    OperatorEntry { operator: Operator::LessThan, types: ORDERED_TYPES },
    OperatorEntry { operator: Operator::GreaterThan, types: ORDERED_TYPES },
    OperatorEntry { operator: Operator::LessOrEqual, types: ORDERED_TYPES },
    OperatorEntry { operator: Operator::GreaterOrEqual, types: ORDERED_TYPES },
    OperatorEntry { operator: Operator::Like, types: PATTERN_TYPES },
    OperatorEntry { operator: Operator::NotLike, types: PATTERN_TYPES },
];

/// Returns the catalog subset valid for a data type, in catalog order
pub fn operators_for(data_type: DataType) -> Vec<Operator> {
    OPERATOR_CATALOG
        .iter()
        .filter(|entry| entry.types.contains(&data_type))
        .map(|entry| entry.operator)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_operators_in_catalog_order() {
        assert_eq!(
            operators_for(DataType::String),
            vec![Operator::Equal, Operator::NotEqual, Operator::Like, Operator::NotLike]
        );
    }

    #[test]
    fn test_numeric_operators_in_catalog_order() {
        assert_eq!(
            operators_for(DataType::Currency),
            vec![
                Operator::Equal,
                Operator::NotEqual,
                Operator::LessThan,
                Operator::GreaterThan,
                Operator::LessOrEqual,
                Operator::GreaterOrEqual,
            ]
        );
    }

    #[test]
    fn test_picklist_and_boolean_only_equality() {
        assert_eq!(operators_for(DataType::Picklist), vec![Operator::Equal, Operator::NotEqual]);
        assert_eq!(operators_for(DataType::Boolean), vec![Operator::Equal, Operator::NotEqual]);
    }

    #[test]
    fn test_textarea_has_no_like() {
        assert!(!Operator::Like.applies_to(DataType::TextArea));
        assert!(Operator::Equal.applies_to(DataType::TextArea));
    }

    #[test]
    fn test_address_allows_like() {
        assert!(Operator::NotLike.applies_to(DataType::Address));
        assert!(!Operator::GreaterThan.applies_to(DataType::Address));
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("=".parse::<Operator>().unwrap(), Operator::Equal);
        assert_eq!(" LIKE ".parse::<Operator>().unwrap(), Operator::Like);
        assert_eq!("not  like".parse::<Operator>().unwrap(), Operator::NotLike);
        assert_eq!("NOT IN".parse::<Operator>().unwrap(), Operator::NotEqual);
        assert_eq!("IN".parse::<Operator>().unwrap(), Operator::Equal);
    }

    #[test]
    fn test_parse_unknown_token() {
        assert!(matches!("~=".parse::<Operator>(), Err(CatalogError::UnknownOperator(_))));
    }

    #[test]
    fn test_token_round_trips_through_display() {
        for entry in OPERATOR_CATALOG.iter() {
            let token = entry.operator.to_string();
            assert_eq!(token.parse::<Operator>().unwrap(), entry.operator);
        }
    }
}
