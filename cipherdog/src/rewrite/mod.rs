//! Rewrite tokens and the generators that build them.

pub mod error;
pub mod generator;
pub mod token;
pub mod tokens;

pub use error::Error;
pub use generator::{
    EncryptInsertValuesTokenGenerator, InsertValuesTokenGenerator, TokenGenerator,
    TokenGenerators, UseDefaultInsertColumnsTokenGenerator,
};
pub use token::{
    InsertValueToken, InsertValuesToken, SqlToken, TokenKind, UseDefaultInsertColumnsToken,
};
pub use tokens::SqlTokens;
