//! Check a routing result against configured data nodes.

use tracing::{debug, trace, warn};

use super::{Error, RoutingResult, ShardingConditions, TableUnit};
use crate::metadata::MetaData;
use crate::rule::ShardingRule;
use crate::statement::StatementContext;

/// Rejects routes that point at data nodes the configuration doesn't know about.
#[derive(Debug)]
pub struct RoutingResultValidator<'a> {
    sharding_rule: &'a ShardingRule,
    meta_data: &'a MetaData,
    statement: &'a StatementContext,
    conditions: &'a ShardingConditions,
}

impl<'a> RoutingResultValidator<'a> {
    pub fn new(
        sharding_rule: &'a ShardingRule,
        meta_data: &'a MetaData,
        statement: &'a StatementContext,
        conditions: &'a ShardingConditions,
    ) -> Self {
        Self {
            sharding_rule,
            meta_data,
            statement,
            conditions,
        }
    }

    /// Check every table unit of every routing unit.
    ///
    /// All absent data nodes are reported together, in the order
    /// they appear in the routing result.
    pub fn validate(&self, routing_result: &RoutingResult) -> Result<(), Error> {
        if routing_result.is_empty() {
            trace!("empty routing result, nothing to validate");
            return Ok(());
        }

        let absent = routing_result
            .units
            .iter()
            .flat_map(|unit| {
                unit.table_units
                    .iter()
                    .zip(unit.data_nodes())
                    .filter(|(table_unit, _)| !self.exists(&unit.data_source, table_unit))
                    .map(|(_, data_node)| data_node)
            })
            .collect::<Vec<_>>();

        if absent.is_empty() {
            debug!(
                "routing for {:?} validated [{} units, {} conditions]",
                self.statement.single_table_name().unwrap_or_default(),
                routing_result.units.len(),
                self.conditions.len(),
            );
            Ok(())
        } else {
            let err = Error::AbsentDataNodes(absent);
            warn!("{}", err);
            Err(err)
        }
    }

    fn exists(&self, data_source: &str, table_unit: &TableUnit) -> bool {
        if !self.meta_data.data_sources.contains(data_source) {
            return false;
        }

        match self.sharding_rule.find_table_rule(&table_unit.logic_table) {
            Some(table_rule) => {
                table_rule.contains_data_node(data_source, &table_unit.actual_table)
            }
            None => self.meta_data.tables.contains_table(&table_unit.actual_table),
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::RoutingUnit;
    use super::*;
    use crate::metadata::{DataSourceMetas, TableMetas};
    use crate::rule::TableRule;
    use crate::statement::CommonStatementContext;

    fn sharding_rule() -> ShardingRule {
        ShardingRule::default().with_table_rule(TableRule::new(
            "t_order",
            ["db_0.t_order_0", "db_0.t_order_1", "db_1.t_order_0", "db_1.t_order_1"]
                .iter()
                .map(|node| node.parse().unwrap())
                .collect(),
        ))
    }

    fn meta_data() -> MetaData {
        MetaData::new(
            DataSourceMetas::new(["db_0", "db_1"]),
            TableMetas::default()
                .with("t_order", ["order_id", "user_id"])
                .with("t_order_0", ["order_id", "user_id"])
                .with("t_order_1", ["order_id", "user_id"])
                .with("t_config", ["key", "value"]),
        )
    }

    fn validate(result: RoutingResult) -> Result<(), Error> {
        let rule = sharding_rule();
        let meta = meta_data();
        let statement =
            StatementContext::Common(CommonStatementContext::new(vec!["t_order".into()]));
        let conditions = ShardingConditions::default();
        RoutingResultValidator::new(&rule, &meta, &statement, &conditions).validate(&result)
    }

    #[test]
    fn test_configured_data_node() {
        let result =
            RoutingResult::new(vec![RoutingUnit::new("db_0").table("t_order", "t_order_0")]);
        validate(result).unwrap();
    }

    #[test]
    fn test_absent_data_source() {
        let result =
            RoutingResult::new(vec![RoutingUnit::new("db_2").table("t_order", "t_order_0")]);
        let err = validate(result).unwrap_err();
        assert_eq!(
            err.to_string(),
            "We get some absent DataNodes=[db_2.t_order_0] in routing result, \
             please check the configuration of rule and data node."
        );
    }

    #[test]
    fn test_every_absent_node_reported() {
        let result = RoutingResult::new(vec![
            RoutingUnit::new("db_0")
                .table("t_order", "t_order_0")
                .table("t_order", "t_order_7"),
            RoutingUnit::new("db_1").table("t_order", "t_order_1"),
            RoutingUnit::new("db_2")
                .table("t_order", "t_order_0")
                .table("t_order", "t_order_1"),
        ]);

        let Error::AbsentDataNodes(nodes) = validate(result).unwrap_err();
        assert_eq!(
            nodes.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
            vec!["db_0.t_order_7", "db_2.t_order_0", "db_2.t_order_1"]
        );
    }

    #[test]
    fn test_table_without_rule() {
        let result =
            RoutingResult::new(vec![RoutingUnit::new("db_1").table("t_config", "t_config")]);
        validate(result).unwrap();

        let result =
            RoutingResult::new(vec![RoutingUnit::new("db_1").table("t_missing", "t_missing")]);
        assert!(validate(result).is_err());
    }

    #[test]
    fn test_empty_result() {
        validate(RoutingResult::default()).unwrap();
    }
}
