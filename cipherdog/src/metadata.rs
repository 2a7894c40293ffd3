//! Backing store metadata: which data sources and tables exist.

use indexmap::{IndexMap, IndexSet};

/// Configured physical data sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSourceMetas {
    names: IndexSet<String>,
}

impl DataSourceMetas {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Table columns, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMetas {
    tables: IndexMap<String, Vec<String>>,
}

impl TableMetas {
    pub fn add<I, S>(&mut self, table: impl Into<String>, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(table.into(), columns.into_iter().map(Into::into).collect());
    }

    pub fn with<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add(table, columns);
        self
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Columns of a table, empty if we don't know about it.
    pub fn columns(&self, table: &str) -> &[String] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Metadata snapshot used while routing a statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaData {
    pub data_sources: DataSourceMetas,
    pub tables: TableMetas,
}

impl MetaData {
    pub fn new(data_sources: DataSourceMetas, tables: TableMetas) -> Self {
        Self {
            data_sources,
            tables,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_table_metas() {
        let metas = TableMetas::default().with("t_order", ["order_id", "user_id"]);
        assert!(metas.contains_table("t_order"));
        assert!(!metas.contains_table("t_order_item"));
        assert_eq!(metas.columns("t_order"), &["order_id", "user_id"]);
        assert!(metas.columns("t_order_item").is_empty());
    }

    #[test]
    fn test_data_source_metas() {
        let metas = DataSourceMetas::new(["db_0", "db_1"]);
        assert!(metas.contains("db_1"));
        assert!(!metas.contains("db_2"));
    }
}
