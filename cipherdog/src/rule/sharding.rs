//! Sharding rule lookups.

use fnv::FnvHashMap as HashMap;
use indexmap::IndexMap;

use cipherdog_config::{Config, ShardedTable};

use super::Error;
use crate::route::DataNode;

/// Where a logical table's rows live.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRule {
    logic_table: String,
    data_nodes: Vec<DataNode>,
    /// Actual tables, grouped by data source.
    actual_tables: IndexMap<String, Vec<String>>,
}

impl TableRule {
    pub fn new(logic_table: impl Into<String>, data_nodes: Vec<DataNode>) -> Self {
        let mut actual_tables: IndexMap<String, Vec<String>> = IndexMap::new();
        for node in &data_nodes {
            actual_tables
                .entry(node.data_source.clone())
                .or_default()
                .push(node.table.clone());
        }

        Self {
            logic_table: logic_table.into(),
            data_nodes,
            actual_tables,
        }
    }

    fn from_config(table: &ShardedTable) -> Result<Self, Error> {
        let data_nodes = table
            .data_nodes()?
            .into_iter()
            .map(|(data_source, table)| DataNode::new(data_source, table))
            .collect();
        Ok(Self::new(&table.name, data_nodes))
    }

    pub fn logic_table(&self) -> &str {
        &self.logic_table
    }

    pub fn data_nodes(&self) -> &[DataNode] {
        &self.data_nodes
    }

    /// Data sources this table has at least one actual table in.
    pub fn data_source_names(&self) -> impl Iterator<Item = &str> {
        self.actual_tables.keys().map(String::as_str)
    }

    /// Actual tables in a data source, empty if the table isn't there.
    pub fn actual_table_names(&self, data_source: &str) -> &[String] {
        self.actual_tables
            .get(data_source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// This table has a data node at this exact location.
    pub fn contains_data_node(&self, data_source: &str, actual_table: &str) -> bool {
        self.actual_table_names(data_source)
            .iter()
            .any(|table| table == actual_table)
    }
}

/// Sharded tables, keyed by logical name.
#[derive(Debug, Clone, Default)]
pub struct ShardingRule {
    tables: HashMap<String, TableRule>,
}

impl ShardingRule {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut rule = Self::default();

        for table in &config.sharded_tables {
            rule.add_table_rule(TableRule::from_config(table)?);
        }

        Ok(rule)
    }

    pub fn add_table_rule(&mut self, table_rule: TableRule) {
        self.tables
            .insert(table_rule.logic_table.clone(), table_rule);
    }

    pub fn with_table_rule(mut self, table_rule: TableRule) -> Self {
        self.add_table_rule(table_rule);
        self
    }

    pub fn find_table_rule(&self, logic_table: &str) -> Option<&TableRule> {
        self.tables.get(logic_table)
    }
}
