use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] cipherdog_config::Error),

    #[error("encryptor: {0}")]
    Encryptor(#[from] crate::encryptor::Error),

    #[error("column \"{table}.{column}\" uses unknown encryptor \"{encryptor}\"")]
    UnknownEncryptor {
        table: String,
        column: String,
        encryptor: String,
    },

    #[error("column \"{table}.{column}\" has an assisted query column, but encryptor \"{encryptor}\" can't produce assisted query values")]
    AssistedQueryUnsupported {
        table: String,
        column: String,
        encryptor: String,
    },
}
