use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encryption algorithm backing an encryptor.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Copy, Default, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EncryptorKind {
    /// AES-128, reversible.
    #[default]
    Aes,
    /// MD5 digest, one-way, usable for assisted queries.
    Md5,
}

/// Named encryptor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptorConfig {
    pub name: String,
    pub kind: EncryptorKind,
    /// Algorithm settings, e.g. `"aes.key.value"`.
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

/// One encrypted logical column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptColumn {
    /// Column name the application uses.
    pub logic_column: String,
    /// Physical column storing the ciphertext.
    pub cipher_column: String,
    /// Physical column keeping the original value, if any.
    #[serde(default)]
    pub plain_column: Option<String>,
    /// Physical column with the searchable digest, if any.
    #[serde(default)]
    pub assisted_query_column: Option<String>,
    /// Name of the encryptor in `[[encrypt.encryptors]]`.
    pub encryptor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncryptTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<EncryptColumn>,
}

/// Encryption settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Encrypt {
    #[serde(default)]
    pub encryptors: Vec<EncryptorConfig>,
    #[serde(default)]
    pub tables: Vec<EncryptTable>,
}

impl Encrypt {
    pub fn encryptor(&self, name: &str) -> Option<&EncryptorConfig> {
        self.encryptors.iter().find(|e| e.name == name)
    }
}
