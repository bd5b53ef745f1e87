//! Boolean fields: literal true/false tokens

use crate::catalog::Operator;

/// Anything other than "true" compiles to `false`
pub fn compile_boolean(field: &str, operator: Option<Operator>, value: &str) -> String {
    let literal = value == "true";
    format!(" {} {} {}", field, super::operator_token(operator), literal)
}
