// Submodules
pub mod core;
pub mod encrypt;
pub mod error;
pub mod props;
pub mod sharding;

pub use core::{Config, DataSource};
pub use encrypt::{Encrypt, EncryptColumn, EncryptTable, EncryptorConfig, EncryptorKind};
pub use error::Error;
pub use props::{PropKey, PropType, Props};
pub use sharding::ShardedTable;
