//! Custom filter logic language and the filter editor.
//!
//! Custom logic lets a user combine numbered filter rows with `AND`, `OR`,
//! `NOT` and parentheses, e.g. `1 AND (2 OR NOT 3)`. This crate parses that
//! text, converts it to the core expression tree, and wraps the row model in
//! a [`editor::FilterEditor`] that tracks validation state.

pub mod convert;
pub mod custom_logic;
pub mod editor;
pub mod parser;
