use serde::{Deserialize, Serialize};

use super::error::Error;

/// Sharded (logical) table and where its rows actually live.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct ShardedTable {
    /// Logical table name, as written by the application.
    pub name: String,
    /// Data nodes, written as `<data_source>.<actual_table>`.
    #[serde(default)]
    pub actual_data_nodes: Vec<String>,
}

impl ShardedTable {
    /// Split data nodes into (data source, actual table) pairs.
    pub fn data_nodes(&self) -> Result<Vec<(String, String)>, Error> {
        self.actual_data_nodes
            .iter()
            .map(|node| split_data_node(node))
            .collect()
    }
}

/// Split `db_0.t_order_0` into `("db_0", "t_order_0")`.
pub fn split_data_node(node: &str) -> Result<(String, String), Error> {
    match node.trim().split_once('.') {
        Some((data_source, table))
            if !data_source.is_empty() && !table.is_empty() && !table.contains('.') =>
        {
            Ok((data_source.to_string(), table.to_string()))
        }
        _ => Err(Error::DataNode(node.to_string())),
    }
}
