//! One-way MD5 digest.

use cipherdog_config::EncryptorKind;

use super::{Error, QueryAssistedEncryptor, ShardingEncryptor};
use crate::statement::Value;

/// Hex MD5 of the value's text form. Can't be reversed,
/// so decrypt returns its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Encryptor;

impl Md5Encryptor {
    fn digest(plaintext: &str) -> String {
        format!("{:x}", ::md5::compute(plaintext.as_bytes()))
    }
}

impl ShardingEncryptor for Md5Encryptor {
    fn kind(&self) -> EncryptorKind {
        EncryptorKind::Md5
    }

    fn encrypt(&self, plaintext: &Value) -> Result<Value, Error> {
        Ok(plaintext
            .as_text()
            .map(|text| Value::String(Self::digest(&text)))
            .unwrap_or(Value::Null))
    }

    fn decrypt(&self, ciphertext: &Value) -> Result<Value, Error> {
        Ok(ciphertext.clone())
    }

    fn assisted_query(&self) -> Option<&dyn QueryAssistedEncryptor> {
        Some(self)
    }
}

impl QueryAssistedEncryptor for Md5Encryptor {
    fn query_assisted_encrypt(&self, plaintext: Option<&str>) -> Option<String> {
        plaintext.map(Self::digest)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_md5() {
        let encryptor = Md5Encryptor;
        assert_eq!(
            encryptor.encrypt(&Value::from("test")).unwrap(),
            Value::from("098f6bcd4621d373cade4e832627b4f6")
        );
        assert_eq!(encryptor.encrypt(&Value::Null).unwrap(), Value::Null);
        assert_eq!(
            encryptor.decrypt(&Value::from("abc")).unwrap(),
            Value::from("abc")
        );

        let assisted = encryptor.assisted_query().unwrap();
        assert_eq!(
            assisted.query_assisted_encrypt(Some("test")).as_deref(),
            Some("098f6bcd4621d373cade4e832627b4f6")
        );
        assert_eq!(assisted.query_assisted_encrypt(None), None);
    }
}
