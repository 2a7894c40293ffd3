//! Column encryptors.
//!
//! Every encryptor can encrypt and decrypt. Some can also produce
//! a deterministic digest for assisted queries; callers ask for
//! that capability with [`ShardingEncryptor::assisted_query`]
//! before using it.

pub mod aes;
pub mod error;
pub mod md5;

use std::fmt::Debug;
use std::sync::Arc;

use cipherdog_config::{EncryptorConfig, EncryptorKind};

pub use aes::AesEncryptor;
pub use error::Error;
pub use self::md5::Md5Encryptor;

use crate::statement::Value;

/// Encrypts column values.
pub trait ShardingEncryptor: Debug + Send + Sync {
    /// Algorithm name.
    fn kind(&self) -> EncryptorKind;

    /// Encrypt a value. NULL stays NULL.
    fn encrypt(&self, plaintext: &Value) -> Result<Value, Error>;

    /// Decrypt a value. NULL stays NULL.
    fn decrypt(&self, ciphertext: &Value) -> Result<Value, Error>;

    /// Assisted query capability, if this encryptor has it.
    fn assisted_query(&self) -> Option<&dyn QueryAssistedEncryptor> {
        None
    }
}

/// Deterministic transform used to search encrypted columns.
pub trait QueryAssistedEncryptor: Debug + Send + Sync {
    fn query_assisted_encrypt(&self, plaintext: Option<&str>) -> Option<String>;
}

/// Build an encryptor from its configuration.
pub fn build(config: &EncryptorConfig) -> Result<Arc<dyn ShardingEncryptor>, Error> {
    Ok(match config.kind {
        EncryptorKind::Aes => Arc::new(AesEncryptor::new(config)?),
        EncryptorKind::Md5 => Arc::new(Md5Encryptor),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build() {
        let mut config = EncryptorConfig {
            name: "pwd".into(),
            kind: EncryptorKind::Md5,
            ..Default::default()
        };
        let md5 = build(&config).unwrap();
        assert_eq!(md5.kind(), EncryptorKind::Md5);
        assert!(md5.assisted_query().is_some());

        config.kind = EncryptorKind::Aes;
        assert!(matches!(
            build(&config),
            Err(Error::MissingProperty { property: "aes.key.value", .. })
        ));

        config
            .props
            .insert("aes.key.value".into(), "123456".into());
        let aes = build(&config).unwrap();
        assert!(aes.assisted_query().is_none());
    }
}
