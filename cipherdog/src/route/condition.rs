//! Sharding conditions the router extracted from a statement.

use crate::statement::Value;

/// Values a sharding column was compared against.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteValue {
    pub table: String,
    pub column: String,
    pub values: Vec<Value>,
}

/// Conditions joined by `AND`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShardingCondition {
    pub route_values: Vec<RouteValue>,
}

/// Conditions joined by `OR`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShardingConditions {
    pub conditions: Vec<ShardingCondition>,
}

impl ShardingConditions {
    pub fn new(conditions: Vec<ShardingCondition>) -> Self {
        Self { conditions }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Strategy the router used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingKind {
    /// Single sharded table, or tables bound together.
    #[default]
    Standard,
    /// Several sharded tables that aren't bound.
    Complex,
    /// Every data node of the table.
    Broadcast,
    /// Any one data source.
    Unicast,
    /// Not sharded, sent as-is.
    Ignore,
}

impl RoutingKind {
    /// Routes computed from sharding conditions can drift from
    /// configured data nodes and need checking.
    pub fn requires_validation(&self) -> bool {
        matches!(self, Self::Standard | Self::Complex)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_requires_validation() {
        assert!(RoutingKind::Standard.requires_validation());
        assert!(RoutingKind::Complex.requires_validation());
        assert!(!RoutingKind::Broadcast.requires_validation());
        assert!(!RoutingKind::Unicast.requires_validation());
        assert!(!RoutingKind::Ignore.requires_validation());
    }
}
