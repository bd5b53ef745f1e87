//! Numeric, date and other unquoted fields

use crate::catalog::Operator;

pub fn compile_scalar(field: &str, operator: Option<Operator>, value: &str) -> String {
    let value = if value.is_empty() { "''" } else { value };
    format!(" {} {} {}", field, super::operator_token(operator), value)
}
