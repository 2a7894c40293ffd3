//! Encrypting `INSERT` rewrites and routing validation
//! for sharded databases.

pub mod encryptor;
pub mod logger;
pub mod metadata;
pub mod rewrite;
pub mod route;
pub mod rule;
pub mod statement;

pub use metadata::{DataSourceMetas, MetaData, TableMetas};
pub use rewrite::{SqlToken, SqlTokens, TokenGenerators};
pub use route::{RoutingResult, RoutingResultValidator};
pub use rule::{EncryptRule, RuleStore, Rules, ShardingRule};
pub use statement::{StatementContext, Value};
