//! Routing result, as computed by the router.

use serde::{Deserialize, Serialize};

use super::DataNode;

/// Logical table and the actual table a statement touches for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableUnit {
    pub logic_table: String,
    pub actual_table: String,
}

impl TableUnit {
    pub fn new(logic_table: impl Into<String>, actual_table: impl Into<String>) -> Self {
        Self {
            logic_table: logic_table.into(),
            actual_table: actual_table.into(),
        }
    }
}

/// One data source a statement is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingUnit {
    pub data_source: String,
    #[serde(default)]
    pub table_units: Vec<TableUnit>,
}

impl RoutingUnit {
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            table_units: vec![],
        }
    }

    pub fn table(mut self, logic_table: &str, actual_table: &str) -> Self {
        self.table_units
            .push(TableUnit::new(logic_table, actual_table));
        self
    }

    /// Data nodes this unit touches, in order.
    pub fn data_nodes(&self) -> impl Iterator<Item = DataNode> + '_ {
        self.table_units
            .iter()
            .map(|unit| DataNode::new(&self.data_source, &unit.actual_table))
    }
}

/// Where a statement goes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutingResult {
    #[serde(default)]
    pub units: Vec<RoutingUnit>,
}

impl RoutingResult {
    pub fn new(units: Vec<RoutingUnit>) -> Self {
        Self { units }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_data_nodes() {
        let unit = RoutingUnit::new("db_0")
            .table("t_order", "t_order_0")
            .table("t_order_item", "t_order_item_0");
        assert_eq!(
            unit.data_nodes().map(|n| n.to_string()).collect::<Vec<_>>(),
            vec!["db_0.t_order_0", "db_0.t_order_item_0"]
        );
    }
}
