//! AES-128 with a key derived from a passphrase.

use aws_lc_rs::cipher::{
    DecryptionContext, PaddedBlockDecryptingKey, PaddedBlockEncryptingKey, UnboundCipherKey,
    AES_128,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use cipherdog_config::{EncryptorConfig, EncryptorKind};
use sha1::{Digest, Sha1};

use super::{Error, ShardingEncryptor};
use crate::statement::Value;

const KEY_PROPERTY: &str = "aes.key.value";

/// AES-128 in ECB mode with PKCS#7 padding.
///
/// The key is the first 16 bytes of the SHA-1 of `aes.key.value`.
/// ECB keeps ciphertext deterministic, so equal values can still be
/// matched in `WHERE` clauses. Ciphertext is base64-encoded.
#[derive(Clone)]
pub struct AesEncryptor {
    key: [u8; 16],
}

impl std::fmt::Debug for AesEncryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesEncryptor").finish_non_exhaustive()
    }
}

impl AesEncryptor {
    pub fn new(config: &EncryptorConfig) -> Result<Self, Error> {
        let passphrase = config
            .props
            .get(KEY_PROPERTY)
            .ok_or_else(|| Error::MissingProperty {
                encryptor: config.name.clone(),
                property: KEY_PROPERTY,
            })?;
        Ok(Self::from_passphrase(passphrase))
    }

    pub fn from_passphrase(passphrase: &str) -> Self {
        let digest = Sha1::digest(passphrase.as_bytes());
        let mut key = [0u8; 16];
        key.copy_from_slice(&digest[..16]);
        Self { key }
    }

    fn unbound_key(&self) -> Result<UnboundCipherKey, Error> {
        Ok(UnboundCipherKey::new(&AES_128, &self.key)?)
    }
}

impl ShardingEncryptor for AesEncryptor {
    fn kind(&self) -> EncryptorKind {
        EncryptorKind::Aes
    }

    fn encrypt(&self, plaintext: &Value) -> Result<Value, Error> {
        let Some(text) = plaintext.as_text() else {
            return Ok(Value::Null);
        };

        let key = PaddedBlockEncryptingKey::ecb_pkcs7(self.unbound_key()?)?;
        let mut in_out = text.into_bytes();
        let _context = key.encrypt(&mut in_out)?;

        Ok(Value::String(STANDARD.encode(&in_out)))
    }

    fn decrypt(&self, ciphertext: &Value) -> Result<Value, Error> {
        let Some(text) = ciphertext.as_text() else {
            return Ok(Value::Null);
        };

        let key = PaddedBlockDecryptingKey::ecb_pkcs7(self.unbound_key()?)?;
        let mut in_out = STANDARD.decode(text)?;
        let plaintext = key.decrypt(&mut in_out, DecryptionContext::None)?;

        Ok(Value::String(String::from_utf8(plaintext.to_vec())?))
    }
}
