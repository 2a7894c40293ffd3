use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Statement(#[from] crate::statement::Error),

    #[error("encryptor: {0}")]
    Encryptor(#[from] crate::encryptor::Error),

    #[error("column \"{table}.{column}\" has an assisted query column, but its encryptor can't produce assisted query values")]
    AssistedQueryUnsupported { table: String, column: String },

    #[error("column \"{column}\" is not in the INSERT column list of \"{table}\"")]
    ColumnNotFound { table: String, column: String },

    #[error("INSERT into \"{table}\" has no column list and {values} values, but {columns} columns are known")]
    DefaultColumnsMismatch {
        table: String,
        columns: usize,
        values: usize,
    },
}
