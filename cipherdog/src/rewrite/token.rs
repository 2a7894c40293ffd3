//! Rewrite tokens.
//!
//! A token describes what to write over a span of the original
//! query. Tokens are built by generators and consumed when the
//! query is rendered.

use crate::route::DataNode;
use crate::statement::ExpressionSegment;

/// One row of `VALUES`, as it will be written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertValueToken {
    /// Row expressions. Rewrites insert derived expressions
    /// and replace literals in place.
    pub values: Vec<ExpressionSegment>,
    /// Data nodes this row is routed to.
    pub data_nodes: Vec<DataNode>,
}

impl InsertValueToken {
    pub fn new(values: Vec<ExpressionSegment>, data_nodes: Vec<DataNode>) -> Self {
        Self { values, data_nodes }
    }
}

/// Every row after `VALUES`, replacing `start..=stop` in the query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertValuesToken {
    pub start: usize,
    pub stop: usize,
    pub insert_value_tokens: Vec<InsertValueToken>,
}

impl InsertValuesToken {
    pub fn new(start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            insert_value_tokens: vec![],
        }
    }
}

/// Column list written for an `INSERT` that didn't have one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UseDefaultInsertColumnsToken {
    pub start: usize,
    pub columns: Vec<String>,
}

impl UseDefaultInsertColumnsToken {
    pub fn new(start: usize, columns: Vec<String>) -> Self {
        Self { start, columns }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Token kind. At most one token of each kind exists per statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    UseDefaultInsertColumns,
    InsertValues,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SqlToken {
    UseDefaultInsertColumns(UseDefaultInsertColumnsToken),
    InsertValues(InsertValuesToken),
}

impl SqlToken {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::UseDefaultInsertColumns(_) => TokenKind::UseDefaultInsertColumns,
            Self::InsertValues(_) => TokenKind::InsertValues,
        }
    }

    /// Offset in the original query where this token applies.
    pub fn start(&self) -> usize {
        match self {
            Self::UseDefaultInsertColumns(token) => token.start,
            Self::InsertValues(token) => token.start,
        }
    }
}

impl From<InsertValuesToken> for SqlToken {
    fn from(value: InsertValuesToken) -> Self {
        Self::InsertValues(value)
    }
}

impl From<UseDefaultInsertColumnsToken> for SqlToken {
    fn from(value: UseDefaultInsertColumnsToken) -> Self {
        Self::UseDefaultInsertColumns(value)
    }
}
