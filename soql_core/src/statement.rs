//! Full SOQL statement assembly around a compiled WHERE body

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assembly::WhereClause;

/// Row limit applied when none is given
pub const DEFAULT_LIMIT: u32 = 5000;

/// Fields always selected ahead of the user's choice
const BASE_FIELDS: [&str; 2] = ["Id", "Name"];

#[derive(Debug, Clone, PartialEq)]
pub enum StatementError {
    NoFieldsSelected,
    MissingObjectType,
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementError::NoFieldsSelected => write!(f, "Select at least 1 field to display."),
            StatementError::MissingObjectType => write!(f, "No object type selected."),
        }
    }
}

impl std::error::Error for StatementError {}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// A SELECT statement over one object type
#[derive(Debug, Clone, PartialEq)]
pub struct SoqlStatement {
    pub object_type: String,
    pub fields: Vec<String>,
    pub where_clause: WhereClause,
    pub order_by: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl SoqlStatement {
    pub fn new(object_type: &str, fields: Vec<String>) -> Self {
        Self {
            object_type: object_type.to_string(),
            fields,
            where_clause: WhereClause::empty(),
            order_by: None,
            limit: None,
        }
    }

    pub fn with_where(mut self, where_clause: WhereClause) -> Self {
        self.where_clause = where_clause;
        self
    }

    pub fn with_order_by(mut self, order_by: Option<OrderBy>) -> Self {
        self.order_by = order_by.filter(|order| !order.field.is_empty());
        self
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Renders the statement text
    pub fn render(&self) -> Result<String, StatementError> {
        if self.object_type.is_empty() {
            return Err(StatementError::MissingObjectType);
        }

        if self.fields.is_empty() {
            return Err(StatementError::NoFieldsSelected);
        }

        let mut columns: Vec<&str> = BASE_FIELDS.to_vec();
        columns.extend(
            self.fields
                .iter()
                .map(|field| field.as_str())
                .filter(|field| !BASE_FIELDS.contains(field)),
        );

        let mut soql = format!("SELECT {} FROM {}", columns.join(", "), self.object_type);
        if let Some(clause) = self.where_clause.to_clause() {
            soql.push(' ');
            soql.push_str(&clause);
        }
        if let Some(order) = &self.order_by {
            soql.push_str(&format!(" ORDER BY {} {}", order.field, order.direction));
        }
        soql.push_str(&format!(" LIMIT {}", self.limit.unwrap_or(DEFAULT_LIMIT)));

        Ok(soql)
    }
}
