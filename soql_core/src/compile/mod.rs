//! Compiles a single filter row into a clause fragment
//!
//! Every fragment starts with one space so fragments can be concatenated
//! directly after a joiner keyword.

mod boolean;
mod picklist;
mod scalar;
mod text;

use crate::catalog::Operator;
use crate::rows::{FilterRow, RowKind};

/// Compile a row into its clause fragment
pub fn compile_row(row: &FilterRow) -> String {
    let field = row.field();
    let operator = row.operator();

    match row.kind() {
        RowKind::Picklist(state) => {
            picklist::compile_picklist(field, operator, &state.selected_values)
        }
        RowKind::Scalar(data_type) if data_type.policy().requires_quoting => {
            text::compile_text(field, operator, row.value())
        }
        RowKind::Boolean => boolean::compile_boolean(field, operator, row.value()),
        _ => scalar::compile_scalar(field, operator, row.value()),
    }
}

/// The token for an operator, or nothing when unset
fn operator_token(operator: Option<Operator>) -> &'static str {
    operator.map(|op| op.token()).unwrap_or_default()
}

/// Wraps a value in single quotes, escaping quotes and backslashes
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}
