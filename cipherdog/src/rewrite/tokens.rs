//! Tokens generated so far for one statement.

use indexmap::IndexMap;

use super::{InsertValuesToken, SqlToken, TokenKind, UseDefaultInsertColumnsToken};

/// Tokens emitted by generators, keyed by kind, in emission order.
///
/// Generators later in a pass look up tokens emitted earlier
/// and update them instead of emitting a second one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlTokens {
    tokens: IndexMap<TokenKind, SqlToken>,
}

impl SqlTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, kind: TokenKind) -> Option<&SqlToken> {
        self.tokens.get(&kind)
    }

    pub fn find_mut(&mut self, kind: TokenKind) -> Option<&mut SqlToken> {
        self.tokens.get_mut(&kind)
    }

    /// Add a token, replacing an existing one of the same kind
    /// without changing its position.
    pub fn insert(&mut self, token: impl Into<SqlToken>) {
        let token = token.into();
        self.tokens.insert(token.kind(), token);
    }

    pub fn insert_values(&self) -> Option<&InsertValuesToken> {
        match self.find(TokenKind::InsertValues) {
            Some(SqlToken::InsertValues(token)) => Some(token),
            _ => None,
        }
    }

    pub fn insert_values_mut(&mut self) -> Option<&mut InsertValuesToken> {
        match self.find_mut(TokenKind::InsertValues) {
            Some(SqlToken::InsertValues(token)) => Some(token),
            _ => None,
        }
    }

    pub fn use_default_insert_columns(&self) -> Option<&UseDefaultInsertColumnsToken> {
        match self.find(TokenKind::UseDefaultInsertColumns) {
            Some(SqlToken::UseDefaultInsertColumns(token)) => Some(token),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens ordered by where they apply in the query.
    pub fn into_tokens(self) -> Vec<SqlToken> {
        let mut tokens = self.tokens.into_values().collect::<Vec<_>>();
        tokens.sort_by_key(|token| token.start());
        tokens
    }
}
