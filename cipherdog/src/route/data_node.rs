use std::fmt::Display;
use std::str::FromStr;

use cipherdog_config::sharding::split_data_node;
use serde::{Deserialize, Serialize};

/// Data source and actual table a row lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataNode {
    pub data_source: String,
    pub table: String,
}

impl DataNode {
    pub fn new(data_source: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table: table.into(),
        }
    }
}

impl Display for DataNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.data_source, self.table)
    }
}

impl FromStr for DataNode {
    type Err = cipherdog_config::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (data_source, table) = split_data_node(s)?;
        Ok(Self { data_source, table })
    }
}
