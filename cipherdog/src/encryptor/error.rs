use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("encryptor \"{encryptor}\" requires property \"{property}\"")]
    MissingProperty {
        encryptor: String,
        property: &'static str,
    },

    #[error("cipher operation failed")]
    Cipher,

    #[error("{0}")]
    Base64(#[from] base64::DecodeError),

    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<aws_lc_rs::error::Unspecified> for Error {
    fn from(_: aws_lc_rs::error::Unspecified) -> Self {
        Self::Cipher
    }
}
