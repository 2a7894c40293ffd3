//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Toml(#[from] toml::de::Error),

    #[error("{message}\n{excerpt}")]
    Config { message: String, excerpt: String },

    #[error("{0}")]
    InvalidProps(String),

    #[error("data node \"{0}\" is not in \"<data_source>.<table>\" format")]
    DataNode(String),

    #[error("column \"{table}.{column}\" uses unknown encryptor \"{encryptor}\"")]
    UnknownEncryptor {
        table: String,
        column: String,
        encryptor: String,
    },

    #[error("table \"{table}\" uses unknown data source \"{data_source}\"")]
    UnknownDataSource { table: String, data_source: String },
}

impl Error {
    /// Attach the offending part of the config file to a TOML parse error.
    pub fn config(source: &str, err: toml::de::Error) -> Self {
        let excerpt = err
            .span()
            .map(|span| {
                let start = source[..span.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
                let end = source[span.end..]
                    .find('\n')
                    .map(|i| span.end + i)
                    .unwrap_or(source.len());
                source[start..end].to_string()
            })
            .unwrap_or_default();

        Self::Config {
            message: err.message().to_string(),
            excerpt,
        }
    }
}
