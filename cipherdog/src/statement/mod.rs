//! Statement context: the parsed statement, normalized for rewrites.

pub mod context;
pub mod error;
pub mod expression;
pub mod insert_value;
pub mod parser;
pub mod value;

pub use context::{CommonStatementContext, InsertStatementContext, StatementContext, ValuesSegment};
pub use error::Error;
pub use expression::{count_placeholders, ExpressionSegment};
pub use insert_value::InsertValueContext;
pub use parser::parse;
pub use value::Value;
