mod build;
mod fields;
mod operators;
mod validate;

pub use build::{BuildOutput, build_query, compile_session};
pub use fields::list_fields;
pub use operators::list_operators;
pub use validate::validate_logic;
