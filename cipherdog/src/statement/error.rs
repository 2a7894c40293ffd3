use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    PgQuery(#[from] pg_query::Error),

    #[error("empty query")]
    EmptyQuery,

    #[error("INSERT has no target table")]
    NoTable,

    #[error("VALUES row {row} has {expected} expressions, found {found} in query text")]
    ValuesMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("missing parameter: ${}", .0 + 1)]
    MissingParameter(usize),

    #[error("no value at column index {0}")]
    ValueIndex(usize),

    #[error("value at column index {index} is an expression: {text}")]
    UnsupportedExpression { index: usize, text: String },
}
