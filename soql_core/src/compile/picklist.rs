//! Picklist fields: IN / NOT IN over the selected values

use super::quote;
use crate::catalog::Operator;

/// An empty selection compiles to `field operator ''`
pub fn compile_picklist(field: &str, operator: Option<Operator>, selected: &[String]) -> String {
    if selected.is_empty() {
        return format!(" {} {} ''", field, super::operator_token(operator));
    }

    let keyword = match operator {
        Some(Operator::NotEqual) => "NOT IN",
        _ => "IN",
    };
    let values: Vec<String> = selected.iter().map(|value| quote(value)).collect();
    format!(" {} {} ({})", field, keyword, values.join(", "))
}
