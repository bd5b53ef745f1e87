//! Parsing for custom filter logic

pub mod parsed_logic;
pub mod parser;

pub use parsed_logic::*;
pub use parser::{LogicParseError, parse_logic};
