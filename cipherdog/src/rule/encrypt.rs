//! Encryption rule lookups.

use std::sync::Arc;

use fnv::FnvHashMap as HashMap;
use indexmap::IndexMap;
use tracing::debug;

use cipherdog_config::Encrypt;

use super::Error;
use crate::encryptor::{self, ShardingEncryptor};

/// How one logical column is stored.
#[derive(Debug, Clone)]
pub struct EncryptColumn {
    pub cipher_column: String,
    pub plain_column: Option<String>,
    pub assisted_query_column: Option<String>,
    pub encryptor: Arc<dyn ShardingEncryptor>,
}

impl EncryptColumn {
    pub fn new(cipher_column: impl Into<String>, encryptor: Arc<dyn ShardingEncryptor>) -> Self {
        Self {
            cipher_column: cipher_column.into(),
            plain_column: None,
            assisted_query_column: None,
            encryptor,
        }
    }

    pub fn plain(mut self, column: impl Into<String>) -> Self {
        self.plain_column = Some(column.into());
        self
    }

    pub fn assisted_query(mut self, column: impl Into<String>) -> Self {
        self.assisted_query_column = Some(column.into());
        self
    }
}

/// Encrypted columns of one table, keyed by logical column name.
#[derive(Debug, Clone, Default)]
pub struct EncryptTable {
    columns: IndexMap<String, EncryptColumn>,
}

impl EncryptTable {
    pub fn column(&self, logic_column: &str) -> Option<&EncryptColumn> {
        self.columns.get(logic_column)
    }

    pub fn logic_columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

/// Which columns are encrypted and how.
#[derive(Debug, Clone, Default)]
pub struct EncryptRule {
    tables: HashMap<String, EncryptTable>,
}

impl EncryptRule {
    /// Build the rule, instantiating every encryptor.
    ///
    /// Assisted query columns backed by an encryptor that can't
    /// produce assisted query values are rejected here, before
    /// any statement is rewritten.
    pub fn new(config: &Encrypt) -> Result<Self, Error> {
        let encryptors = config
            .encryptors
            .iter()
            .map(|e| Ok((e.name.clone(), encryptor::build(e)?)))
            .collect::<Result<HashMap<_, _>, Error>>()?;

        let mut rule = Self::default();

        for table in &config.tables {
            for column in &table.columns {
                let encryptor = encryptors.get(&column.encryptor).cloned().ok_or_else(|| {
                    Error::UnknownEncryptor {
                        table: table.name.clone(),
                        column: column.logic_column.clone(),
                        encryptor: column.encryptor.clone(),
                    }
                })?;

                if column.assisted_query_column.is_some() && encryptor.assisted_query().is_none() {
                    return Err(Error::AssistedQueryUnsupported {
                        table: table.name.clone(),
                        column: column.logic_column.clone(),
                        encryptor: column.encryptor.clone(),
                    });
                }

                rule.add_column(
                    &table.name,
                    &column.logic_column,
                    EncryptColumn {
                        cipher_column: column.cipher_column.clone(),
                        plain_column: column.plain_column.clone(),
                        assisted_query_column: column.assisted_query_column.clone(),
                        encryptor,
                    },
                );
            }
        }

        debug!("encrypt rule loaded for {} tables", rule.tables.len());

        Ok(rule)
    }

    /// Add an encrypted column. Doesn't check encryptor capabilities.
    pub fn add_column(&mut self, table: &str, logic_column: &str, column: EncryptColumn) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .columns
            .insert(logic_column.to_string(), column);
    }

    pub fn with_column(mut self, table: &str, logic_column: &str, column: EncryptColumn) -> Self {
        self.add_column(table, logic_column, column);
        self
    }

    pub fn find_encrypt_table(&self, table: &str) -> Option<&EncryptTable> {
        self.tables.get(table)
    }

    fn find_column(&self, table: &str, column: &str) -> Option<&EncryptColumn> {
        self.find_encrypt_table(table)
            .and_then(|encrypt_table| encrypt_table.column(column))
    }

    pub fn find_sharding_encryptor(
        &self,
        table: &str,
        column: &str,
    ) -> Option<&Arc<dyn ShardingEncryptor>> {
        self.find_column(table, column).map(|c| &c.encryptor)
    }

    pub fn find_cipher_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_column(table, column)
            .map(|c| c.cipher_column.as_str())
    }

    pub fn find_plain_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_column(table, column)
            .and_then(|c| c.plain_column.as_deref())
    }

    pub fn find_assisted_query_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_column(table, column)
            .and_then(|c| c.assisted_query_column.as_deref())
    }

    /// Encrypted logical columns of a table.
    pub fn logic_columns(&self, table: &str) -> Vec<&str> {
        self.find_encrypt_table(table)
            .map(|t| t.logic_columns().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use cipherdog_config::{
        EncryptColumn as ColumnConfig, EncryptTable as TableConfig, EncryptorConfig, EncryptorKind,
    };

    use super::*;

    fn config() -> Encrypt {
        Encrypt {
            encryptors: vec![
                EncryptorConfig {
                    name: "aes".into(),
                    kind: EncryptorKind::Aes,
                    props: [("aes.key.value".to_string(), "123456".to_string())].into(),
                },
                EncryptorConfig {
                    name: "md5".into(),
                    kind: EncryptorKind::Md5,
                    ..Default::default()
                },
            ],
            tables: vec![TableConfig {
                name: "t_user".into(),
                columns: vec![
                    ColumnConfig {
                        logic_column: "pwd".into(),
                        cipher_column: "pwd_cipher".into(),
                        plain_column: Some("pwd_plain".into()),
                        assisted_query_column: None,
                        encryptor: "aes".into(),
                    },
                    ColumnConfig {
                        logic_column: "email".into(),
                        cipher_column: "email_cipher".into(),
                        plain_column: None,
                        assisted_query_column: Some("email_assisted".into()),
                        encryptor: "md5".into(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_lookups() {
        let rule = EncryptRule::new(&config()).unwrap();

        assert!(rule.find_encrypt_table("t_user").is_some());
        assert!(rule.find_encrypt_table("t_order").is_none());
        assert_eq!(rule.logic_columns("t_user"), vec!["pwd", "email"]);

        assert_eq!(
            rule.find_sharding_encryptor("t_user", "pwd").unwrap().kind(),
            EncryptorKind::Aes
        );
        assert!(rule.find_sharding_encryptor("t_user", "name").is_none());

        assert_eq!(rule.find_cipher_column("t_user", "email"), Some("email_cipher"));
        assert_eq!(rule.find_plain_column("t_user", "pwd"), Some("pwd_plain"));
        assert_eq!(rule.find_plain_column("t_user", "email"), None);
        assert_eq!(
            rule.find_assisted_query_column("t_user", "email"),
            Some("email_assisted")
        );
        assert_eq!(rule.find_assisted_query_column("t_user", "pwd"), None);
    }

    #[test]
    fn test_assisted_query_needs_capability() {
        let mut config = config();
        config.tables[0].columns[0].assisted_query_column = Some("pwd_assisted".into());

        let err = EncryptRule::new(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::AssistedQueryUnsupported { ref column, .. } if column == "pwd"
        ));
    }

    #[test]
    fn test_unknown_encryptor() {
        let mut config = config();
        config.tables[0].columns[1].encryptor = "sm4".into();
        assert!(matches!(
            EncryptRule::new(&config),
            Err(Error::UnknownEncryptor { .. })
        ));
    }
}
