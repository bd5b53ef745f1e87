//! Boolean logic joining filter rows

mod brackets;
mod expr;

pub use brackets::validate_brackets;
pub use expr::LogicExpr;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical operator placed between two rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Combinator {
    #[default]
    #[serde(rename = "AND", alias = "And", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "Or", alias = "or")]
    Or,
}

impl Combinator {
    pub fn keyword(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// How complete rows are combined into a WHERE body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicMode {
    /// Every row joined with AND
    #[default]
    #[serde(rename = "AND", alias = "And", alias = "and")]
    And,
    /// Every row joined with OR
    #[serde(rename = "OR", alias = "Or", alias = "or")]
    Or,
    /// Each row after the first is joined by its own condition
    #[serde(rename = "PerRow", alias = "per_row")]
    PerRow,
    /// A user-authored expression over row numbers
    #[serde(rename = "Custom", alias = "custom")]
    Custom,
}

impl fmt::Display for LogicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicMode::And => "AND",
            LogicMode::Or => "OR",
            LogicMode::PerRow => "PerRow",
            LogicMode::Custom => "Custom",
        };
        write!(f, "{}", name)
    }
}

/// Why a custom expression does not describe the current rows
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConditions {
    Empty,
    Syntax(String),
    MissingReference(usize),
    OutOfRange { reference: usize, row_count: usize },
    IncompleteRow(usize),
    /// The expression passed validation but the query was rejected remotely
    Rejected,
}

impl fmt::Display for InvalidConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConditions::Empty => write!(f, "expression is empty"),
            InvalidConditions::Syntax(msg) => write!(f, "{}", msg),
            InvalidConditions::MissingReference(row) => {
                write!(f, "row {} is not referenced", row)
            }
            InvalidConditions::OutOfRange {
                reference,
                row_count,
            } => write!(
                f,
                "reference {} is outside the {} available rows",
                reference, row_count
            ),
            InvalidConditions::IncompleteRow(row) => {
                write!(f, "row {} is referenced but incomplete", row)
            }
            InvalidConditions::Rejected => write!(f, "the query was rejected"),
        }
    }
}

/// Custom-logic validation failures
#[derive(Debug, Clone, PartialEq)]
pub enum LogicError {
    BracketsMismatch,
    InvalidConditions(InvalidConditions),
}

impl LogicError {
    /// The short message shown next to the logic input
    pub fn user_message(&self) -> &'static str {
        match self {
            LogicError::BracketsMismatch => "Brackets Mis-Match",
            LogicError::InvalidConditions(_) => "Invalid custom conditions",
        }
    }
}

impl From<InvalidConditions> for LogicError {
    fn from(value: InvalidConditions) -> Self {
        LogicError::InvalidConditions(value)
    }
}

impl fmt::Display for LogicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicError::BracketsMismatch => write!(f, "{}", self.user_message()),
            LogicError::InvalidConditions(reason) => {
                write!(f, "{}: {}", self.user_message(), reason)
            }
        }
    }
}

impl std::error::Error for LogicError {}
