//! Core data model for building SOQL filter clauses.
//!
//! This crate holds everything needed to turn a list of user-edited filter
//! rows into the body of a WHERE clause:
//! - The operator catalog and per-data-type input policies
//! - Field metadata supplied by the describe collaborator
//! - The filter row model, including the picklist fetch protocol
//! - Per-row condition compilation and clause assembly
//! - The custom-logic expression tree used for numbered boolean logic

pub mod assembly;
pub mod catalog;
pub mod compile;
pub mod logic;
pub mod metadata;
pub mod rows;
pub mod statement;

pub use assembly::{Joining, WhereClause, build_where_clause};
pub use catalog::{CatalogError, DataType, FieldTypePolicy, InputKind, Operator, ValueHandling};
pub use compile::compile_row;
pub use logic::{Combinator, InvalidConditions, LogicError, LogicExpr, LogicMode, validate_brackets};
pub use metadata::{FieldDescriptor, FieldMetadata, PicklistOption};
pub use rows::{
    FetchError, FilterRow, FilterRows, PicklistRequest, PicklistResolution, PicklistSource,
    PicklistState, ResolutionOutcome, RowError, RowId, RowKey, RowKind,
};
pub use statement::{DEFAULT_LIMIT, OrderBy, SoqlStatement, SortDirection, StatementError};
