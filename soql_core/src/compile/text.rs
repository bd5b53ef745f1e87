//! Text fields: quoted values, LIKE wraps in wildcards

use super::quote;
use crate::catalog::Operator;

/// `NOT LIKE` is written as a negated `LIKE`
pub fn compile_text(field: &str, operator: Option<Operator>, value: &str) -> String {
    match operator {
        Some(Operator::Like) => format!(" {} LIKE {}", field, quote(&format!("%{}%", value))),
        Some(Operator::NotLike) => {
            format!(" (NOT {} LIKE  {})", field, quote(&format!("%{}%", value)))
        }
        _ => format!(" {} {} {}", field, super::operator_token(operator), quote(value)),
    }
}
