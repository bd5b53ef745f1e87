//! Validation and compilation of custom logic text

use log::debug;
use soql_core::{FilterRows, InvalidConditions, Joining, LogicError, LogicExpr, build_where_clause};

use crate::parser::logic::parse_logic;

pub use soql_core::validate_brackets;

/// Parses `expression` and checks it against `row_count` rows.
///
/// Brackets are checked first so an unbalanced expression always reports
/// the bracket failure rather than a syntax error.
pub fn check_custom_logic(expression: &str, row_count: usize) -> Result<LogicExpr, LogicError> {
    if expression.trim().is_empty() {
        return Err(InvalidConditions::Empty.into());
    }

    if !validate_brackets(expression) {
        return Err(LogicError::BracketsMismatch);
    }

    let expr: LogicExpr = parse_logic(expression)
        .map_err(|e| InvalidConditions::Syntax(e.to_string()))?
        .into();

    expr.check_references(row_count)?;
    debug!("Custom logic '{}' accepted for {} rows", expr, row_count);
    Ok(expr)
}

/// True when `expression` is balanced, parses, and references exactly the
/// rows `1..=row_count`
pub fn is_valid(expression: &str, row_count: usize) -> bool {
    check_custom_logic(expression, row_count).is_ok()
}

/// Validates `expression` against `rows` and substitutes each referenced
/// row's compiled condition. With no complete rows the body is empty and the
/// expression is not checked.
pub fn compile_custom_logic(expression: &str, rows: &FilterRows) -> Result<String, LogicError> {
    if rows.complete_rows().next().is_none() {
        return Ok(String::new());
    }

    let expr = check_custom_logic(expression, rows.len())?;
    let clause = build_where_clause(rows, Joining::Custom(&expr))?;
    Ok(clause.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_is_valid() {
        assert!(is_valid("1 AND 2", 2));
        assert!(is_valid("(1 OR 2) AND NOT 3", 3));
    }

    #[test]
    fn test_out_of_range_reference() {
        assert!(!is_valid("1 AND 3", 2));
        assert_matches!(
            check_custom_logic("1 AND 3", 2),
            Err(LogicError::InvalidConditions(InvalidConditions::OutOfRange { reference: 3, row_count: 2 }))
        );
    }

    #[test]
    fn test_empty_expression() {
        assert!(!is_valid("", 1));
        assert!(!is_valid("   ", 4));
        assert_matches!(
            check_custom_logic("", 3),
            Err(LogicError::InvalidConditions(InvalidConditions::Empty))
        );
    }

    #[test]
    fn test_brackets_reported_before_syntax() {
        assert_matches!(check_custom_logic("(1 AND 2", 2), Err(LogicError::BracketsMismatch));
        assert_matches!(check_custom_logic("1 AND) 2(", 2), Err(LogicError::BracketsMismatch));
    }

    #[test]
    fn test_syntax_error() {
        assert_matches!(
            check_custom_logic("1 AND AND 2", 2),
            Err(LogicError::InvalidConditions(InvalidConditions::Syntax(_)))
        );
    }

    #[test]
    fn test_every_row_must_be_referenced() {
        assert_matches!(
            check_custom_logic("1 OR 3", 3),
            Err(LogicError::InvalidConditions(InvalidConditions::MissingReference(2)))
        );
    }

    #[test]
    fn test_compile_without_complete_rows() {
        let rows = FilterRows::new();
        assert_eq!(compile_custom_logic("", &rows), Ok(String::new()));
        assert_eq!(compile_custom_logic("1 AND 2", &rows), Ok(String::new()));
    }

    #[test]
    fn test_ten_is_not_one() {
        let expression = "10 AND 2 AND 3 AND 4 AND 5 AND 6 AND 7 AND 8 AND 9";
        assert_matches!(
            check_custom_logic(expression, 10),
            Err(LogicError::InvalidConditions(InvalidConditions::MissingReference(1)))
        );
    }
}
