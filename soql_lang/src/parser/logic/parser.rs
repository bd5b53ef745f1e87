//! Parser for custom filter logic using pest

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::parsed_logic::*;

#[derive(Parser)]
#[grammar = "parser/logic/grammar.pest"]
pub struct LogicParser;

/// Error type for custom logic parsing
#[derive(Debug, Clone, PartialEq)]
pub enum LogicParseError {
    SyntaxError(String),
    InvalidNumber(String),
}

impl std::fmt::Display for LogicParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicParseError::SyntaxError(msg) => write!(f, "Syntax error: {}", msg),
            LogicParseError::InvalidNumber(msg) => write!(f, "Invalid number: {}", msg),
        }
    }
}

impl std::error::Error for LogicParseError {}

/// Parse a custom logic string into a ParsedLogic
pub fn parse_logic(input: &str) -> Result<ParsedLogic, LogicParseError> {
    let mut pairs = LogicParser::parse(Rule::logic, input)
        .map_err(|e| LogicParseError::SyntaxError(e.to_string()))?;

    let logic = pairs
        .next()
        .ok_or_else(|| LogicParseError::SyntaxError("Empty expression".to_string()))?;

    let expr = logic
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::or_expr)
        .ok_or_else(|| LogicParseError::SyntaxError("Empty expression".to_string()))?;

    parse_or_expr(expr)
}

fn parse_or_expr(pair: Pair<Rule>) -> Result<ParsedLogic, LogicParseError> {
    let mut items = Vec::new();
    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() == Rule::and_expr {
            items.push(parse_and_expr(inner_pair)?);
        }
    }
    collapse(items, ParsedLogic::Or)
}

fn parse_and_expr(pair: Pair<Rule>) -> Result<ParsedLogic, LogicParseError> {
    let mut items = Vec::new();
    for inner_pair in pair.into_inner() {
        if inner_pair.as_rule() == Rule::not_expr {
            items.push(parse_not_expr(inner_pair)?);
        }
    }
    collapse(items, ParsedLogic::And)
}

fn parse_not_expr(pair: Pair<Rule>) -> Result<ParsedLogic, LogicParseError> {
    let mut negations = 0;
    let mut primary = None;

    for inner_pair in pair.into_inner() {
        match inner_pair.as_rule() {
            Rule::not_op => negations += 1,
            Rule::primary => primary = Some(parse_primary(inner_pair)?),
            _ => {}
        }
    }

    let mut expr = primary.ok_or_else(|| {
        LogicParseError::SyntaxError("Missing operand after NOT".to_string())
    })?;
    for _ in 0..negations {
        expr = ParsedLogic::Not(Box::new(expr));
    }
    Ok(expr)
}

fn parse_primary(pair: Pair<Rule>) -> Result<ParsedLogic, LogicParseError> {
    let inner_pair = pair
        .into_inner()
        .next()
        .ok_or_else(|| LogicParseError::SyntaxError("Empty operand".to_string()))?;

    match inner_pair.as_rule() {
        Rule::reference => {
            let text = inner_pair.as_str();
            let row = text.parse::<usize>().map_err(|_| {
                LogicParseError::InvalidNumber(format!("Cannot parse row number: {}", text))
            })?;
            Ok(ParsedLogic::Reference(row))
        }
        Rule::group => {
            let expr = inner_pair
                .into_inner()
                .find(|pair| pair.as_rule() == Rule::or_expr)
                .ok_or_else(|| LogicParseError::SyntaxError("Empty parentheses".to_string()))?;
            Ok(ParsedLogic::Group(Box::new(parse_or_expr(expr)?)))
        }
        _ => Err(LogicParseError::SyntaxError(format!(
            "Unknown operand: {:?}",
            inner_pair.as_rule()
        ))),
    }
}

/// A single operand stays as-is; several become one AND/OR node
fn collapse(
    mut items: Vec<ParsedLogic>,
    combine: fn(Vec<ParsedLogic>) -> ParsedLogic,
) -> Result<ParsedLogic, LogicParseError> {
    match items.len() {
        0 => Err(LogicParseError::SyntaxError("Missing operand".to_string())),
        1 => Ok(items.remove(0)),
        _ => Ok(combine(items)),
    }
}
