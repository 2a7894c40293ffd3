//! Routing results and their validation.

pub mod condition;
pub mod data_node;
pub mod error;
pub mod result;
pub mod validator;

pub use condition::{RouteValue, RoutingKind, ShardingCondition, ShardingConditions};
pub use data_node::DataNode;
pub use error::Error;
pub use result::{RoutingResult, RoutingUnit, TableUnit};
pub use validator::RoutingResultValidator;
