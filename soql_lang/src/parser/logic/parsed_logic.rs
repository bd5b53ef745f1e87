//! Parsed structures for custom filter logic

use std::fmt;

/// A parsed custom logic expression
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLogic {
    /// 1-based row number as written
    Reference(usize),
    Not(Box<ParsedLogic>),
    And(Vec<ParsedLogic>),
    Or(Vec<ParsedLogic>),
    /// Parenthesised sub-expression
    Group(Box<ParsedLogic>),
}

impl fmt::Display for ParsedLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedLogic::Reference(row) => write!(f, "{}", row),
            ParsedLogic::Not(inner) => write!(f, "NOT {}", inner),
            ParsedLogic::And(items) => write_joined(f, items, "AND"),
            ParsedLogic::Or(items) => write_joined(f, items, "OR"),
            ParsedLogic::Group(inner) => write!(f, "({})", inner),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[ParsedLogic], keyword: &str) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, " {} ", keyword)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
