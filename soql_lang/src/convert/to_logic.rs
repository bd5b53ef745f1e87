//! Conversion from ParsedLogic to the core expression tree

use soql_core::LogicExpr;

use crate::parser::logic::ParsedLogic;

impl From<ParsedLogic> for LogicExpr {
    fn from(parsed: ParsedLogic) -> Self {
        match parsed {
            ParsedLogic::Reference(row) => LogicExpr::Row(row),
            ParsedLogic::Not(inner) => LogicExpr::Not(Box::new((*inner).into())),
            ParsedLogic::And(items) => LogicExpr::All(convert_all(items)),
            ParsedLogic::Or(items) => LogicExpr::Any(convert_all(items)),
            ParsedLogic::Group(inner) => LogicExpr::Group(Box::new((*inner).into())),
        }
    }
}

fn convert_all(items: Vec<ParsedLogic>) -> Vec<LogicExpr> {
    items.into_iter().map(LogicExpr::from).collect()
}
