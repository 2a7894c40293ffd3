//! Normalized view of one parsed statement.

use crate::metadata::TableMetas;

use super::InsertValueContext;

/// Position of one `(...)` row after `VALUES`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValuesSegment {
    pub start: usize,
    pub stop: usize,
}

impl ValuesSegment {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }
}

/// Parsed `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatementContext {
    table_name: String,
    column_names: Vec<String>,
    default_columns: bool,
    /// Offset of the `VALUES` keyword.
    values_start: Option<usize>,
    values_segments: Vec<ValuesSegment>,
    insert_value_contexts: Vec<InsertValueContext>,
}

impl InsertStatementContext {
    /// Create context for an `INSERT`.
    ///
    /// If the statement doesn't list its columns, the table's
    /// columns from metadata are used instead.
    pub fn new(
        table_name: impl Into<String>,
        declared_columns: Vec<String>,
        table_metas: &TableMetas,
        values_segments: Vec<ValuesSegment>,
        insert_value_contexts: Vec<InsertValueContext>,
    ) -> Self {
        let table_name = table_name.into();
        let default_columns = declared_columns.is_empty();
        let column_names = if default_columns {
            table_metas.columns(&table_name).to_vec()
        } else {
            declared_columns
        };

        Self {
            table_name,
            column_names,
            default_columns,
            values_start: None,
            values_segments,
            insert_value_contexts,
        }
    }

    pub fn with_values_start(mut self, values_start: usize) -> Self {
        self.values_start = Some(values_start);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Column list wasn't written in the query.
    pub fn uses_default_columns(&self) -> bool {
        self.default_columns
    }

    /// Columns from last to first. Insert into rows in this order
    /// so indices of columns not yet visited don't move.
    pub fn descending_column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.column_names.iter().rev().map(String::as_str)
    }

    /// Where the `VALUES` keyword starts. A missing column list
    /// would be written right before it.
    pub fn values_start(&self) -> Option<usize> {
        self.values_start
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == column)
    }

    pub fn values_segments(&self) -> &[ValuesSegment] {
        &self.values_segments
    }

    pub fn insert_value_contexts(&self) -> &[InsertValueContext] {
        &self.insert_value_contexts
    }
}

/// Any statement that's not an `INSERT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommonStatementContext {
    tables: Vec<String>,
}

impl CommonStatementContext {
    pub fn new(tables: Vec<String>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }
}

/// Parsed statement and what we derived from it.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementContext {
    Insert(InsertStatementContext),
    Common(CommonStatementContext),
}

impl StatementContext {
    pub fn insert(&self) -> Option<&InsertStatementContext> {
        match self {
            Self::Insert(insert) => Some(insert),
            Self::Common(_) => None,
        }
    }

    /// `INSERT` with at least one `VALUES` row.
    pub fn insert_with_values(&self) -> Option<&InsertStatementContext> {
        self.insert()
            .filter(|insert| !insert.values_segments().is_empty())
    }

    /// Single table the statement targets, if there is exactly one.
    pub fn single_table_name(&self) -> Option<&str> {
        match self {
            Self::Insert(insert) => Some(insert.table_name()),
            Self::Common(common) => match common.tables() {
                [table] => Some(table.as_str()),
                _ => None,
            },
        }
    }
}

impl From<InsertStatementContext> for StatementContext {
    fn from(value: InsertStatementContext) -> Self {
        Self::Insert(value)
    }
}
