use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use tracing::{info, warn};

use super::encrypt::Encrypt;
use super::error::Error;
use super::props::Props;
use super::sharding::ShardedTable;

/// Physical data source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct DataSource {
    /// Name used in data nodes, e.g. `db_0`.
    pub name: String,
}

/// Configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Generic properties.
    #[serde(default)]
    pub props: Props,

    /// Data sources.
    #[serde(default)]
    pub data_sources: Vec<DataSource>,

    /// List of sharded tables.
    #[serde(default)]
    pub sharded_tables: Vec<ShardedTable>,

    /// Column encryption.
    #[serde(default)]
    pub encrypt: Encrypt,
}

impl Config {
    /// Load configuration from disk or use defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let config = if let Ok(source) = read_to_string(path) {
            let config = Self::from_toml(&source)?;
            info!("loaded \"{}\"", path.display());
            config
        } else {
            warn!(
                "\"{}\" doesn't exist, loading defaults instead",
                path.display()
            );
            Config::default()
        };

        Ok(config)
    }

    /// Parse and check configuration.
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let config: Config = match toml::from_str(source) {
            Ok(config) => config,
            Err(err) => return Err(Error::config(source, err)),
        };
        config.props.validate()?;
        config.check()?;
        Ok(config)
    }

    /// Check that names referenced across sections exist.
    ///
    /// Every problem is logged, the first one is returned.
    pub fn check(&self) -> Result<(), Error> {
        let mut errors = vec![];

        let data_sources = self
            .data_sources
            .iter()
            .map(|ds| ds.name.as_str())
            .collect::<HashSet<_>>();

        for table in &self.sharded_tables {
            for (data_source, _) in table.data_nodes()? {
                if !data_sources.contains(data_source.as_str()) {
                    errors.push(Error::UnknownDataSource {
                        table: table.name.clone(),
                        data_source,
                    });
                }
            }
        }

        for table in &self.encrypt.tables {
            for column in &table.columns {
                if self.encrypt.encryptor(&column.encryptor).is_none() {
                    errors.push(Error::UnknownEncryptor {
                        table: table.name.clone(),
                        column: column.logic_column.clone(),
                        encryptor: column.encryptor.clone(),
                    });
                }
            }
        }

        for error in &errors {
            warn!("{}", error);
        }

        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Names of all configured data sources.
    pub fn data_source_names(&self) -> Vec<String> {
        self.data_sources.iter().map(|ds| ds.name.clone()).collect()
    }
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::*;
    use crate::EncryptorKind;

    pub const SOURCE: &str = r#"
[props]
"sql.show" = true

[[data_sources]]
name = "db_0"

[[data_sources]]
name = "db_1"

[[sharded_tables]]
name = "t_order"
actual_data_nodes = ["db_0.t_order_0", "db_0.t_order_1", "db_1.t_order_0", "db_1.t_order_1"]

[[encrypt.encryptors]]
name = "aes"
kind = "aes"
props = { "aes.key.value" = "123456" }

[[encrypt.encryptors]]
name = "md5"
kind = "md5"

[[encrypt.tables]]
name = "t_order"

[[encrypt.tables.columns]]
logic_column = "pwd"
cipher_column = "pwd_cipher"
plain_column = "pwd_plain"
encryptor = "aes"

[[encrypt.tables.columns]]
logic_column = "email"
cipher_column = "email_cipher"
assisted_query_column = "email_assisted"
encryptor = "md5"
"#;

    #[test]
    fn test_basic() {
        let config = Config::from_toml(SOURCE).unwrap();
        assert!(config.props.sql_show());
        assert_eq!(config.data_source_names(), vec!["db_0", "db_1"]);
        assert_eq!(config.sharded_tables[0].actual_data_nodes.len(), 4);
        assert_eq!(config.encrypt.encryptors[1].kind, EncryptorKind::Md5);
        let columns = &config.encrypt.tables[0].columns;
        assert_eq!(columns[0].plain_column.as_deref(), Some("pwd_plain"));
        assert_eq!(columns[0].assisted_query_column, None);
        assert_eq!(
            columns[1].assisted_query_column.as_deref(),
            Some("email_assisted")
        );
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SOURCE.as_bytes()).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sharded_tables[0].name, "t_order");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("cipherdog.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_encryptor() {
        let source = SOURCE.replace(r#"encryptor = "md5""#, r#"encryptor = "sha256""#);
        let err = Config::from_toml(&source).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownEncryptor { ref encryptor, .. } if encryptor == "sha256"
        ));
    }

    #[test]
    fn test_unknown_data_source() {
        let source = SOURCE.replace("db_1.t_order_1", "db_2.t_order_1");
        let err = Config::from_toml(&source).unwrap_err();
        assert_eq!(
            err.to_string(),
            "table \"t_order\" uses unknown data source \"db_2\""
        );
    }

    #[test]
    fn test_parse_error_excerpt() {
        let err = Config::from_toml("[[data_sources]]\nname = db_0\n").unwrap_err();
        match err {
            Error::Config { excerpt, .. } => assert_eq!(excerpt, "name = db_0"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_props() {
        let err = Config::from_toml("[props]\n\"sql.show\" = 5\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value '5' of 'sql.show' cannot convert to type 'boolean'."
        );
    }
}
