//! Assembles compiled rows into a WHERE body

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::compile::compile_row;
use crate::logic::{Combinator, LogicError, LogicExpr};
use crate::rows::FilterRows;

/// How compiled fragments are joined
#[derive(Debug, Clone, Copy)]
pub enum Joining<'a> {
    /// The same keyword between every pair of rows
    Uniform(Combinator),
    /// Each row's own condition before it
    PerRow,
    /// A validated expression over row numbers
    Custom(&'a LogicExpr),
}

/// The compiled WHERE body, without the `WHERE` keyword
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WhereClause {
    pub body: String,
    pub has_conditions: bool,
}

impl WhereClause {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `WHERE <body>` when there are conditions, otherwise nothing
    pub fn to_clause(&self) -> Option<String> {
        self.has_conditions
            .then(|| format!("WHERE {}", self.body.trim()))
    }
}

/// Builds the WHERE body from the complete rows.
///
/// No complete rows is not an error: the clause is empty and
/// `has_conditions` is false.
pub fn build_where_clause(rows: &FilterRows, joining: Joining<'_>) -> Result<WhereClause, LogicError> {
    let fragments: BTreeMap<usize, (Combinator, String)> = rows
        .complete_rows()
        .map(|(position, row)| (position, (row.condition(), compile_row(row))))
        .collect();

    if fragments.is_empty() {
        debug!("No complete filter rows; query is unconditional");
        return Ok(WhereClause::empty());
    }

    let body = match joining {
        Joining::Uniform(combinator) => {
            let separator = format!(" {}", combinator);
            fragments
                .values()
                .map(|(_, fragment)| fragment.as_str())
                .collect::<Vec<_>>()
                .join(&separator)
        }
        Joining::PerRow => {
            let mut body = String::new();
            for (index, (condition, fragment)) in fragments.values().enumerate() {
                if index > 0 {
                    body.push(' ');
                    body.push_str(condition.keyword());
                }
                body.push_str(fragment);
            }
            body
        }
        Joining::Custom(expr) => {
            expr.check_references(rows.len())?;
            let rendered = expr.render(&|position| {
                fragments
                    .get(&position)
                    .map(|(_, fragment)| fragment.clone())
            })?;
            format!(" {}", rendered)
        }
    };

    debug!("Compiled {} rows into WHERE body:{}", fragments.len(), body);
    Ok(WhereClause {
        body,
        has_conditions: true,
    })
}
