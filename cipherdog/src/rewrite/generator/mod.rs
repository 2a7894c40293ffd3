//! Token generators.
//!
//! Generators run in the order they were added. Each one looks at
//! the statement and the tokens emitted before it, and adds or
//! updates tokens.

pub mod default_columns;
pub mod encrypt_insert_values;
pub mod insert_values;

use std::sync::Arc;

use tracing::trace;

use super::{Error, SqlTokens};
use crate::rule::Rules;
use crate::statement::{InsertStatementContext, StatementContext, ValuesSegment};

pub use default_columns::UseDefaultInsertColumnsTokenGenerator;
pub use encrypt_insert_values::EncryptInsertValuesTokenGenerator;
pub use insert_values::InsertValuesTokenGenerator;

pub trait TokenGenerator {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn applicable(&self, statement: &StatementContext) -> bool;

    fn generate(&self, statement: &StatementContext, tokens: &mut SqlTokens) -> Result<(), Error>;
}

/// Ordered list of generators run over one statement.
pub struct TokenGenerators {
    generators: Vec<Box<dyn TokenGenerator + Send + Sync>>,
}

impl TokenGenerators {
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Generators for encrypting an `INSERT`.
    pub fn encrypt(rules: Arc<Rules>) -> Self {
        let mut generators = Self::new();
        generators.add_generator(Box::new(UseDefaultInsertColumnsTokenGenerator));
        generators.add_generator(Box::new(EncryptInsertValuesTokenGenerator::new(rules)));
        generators
    }

    pub fn add_generator(&mut self, generator: Box<dyn TokenGenerator + Send + Sync>) {
        self.generators.push(generator);
    }

    /// Run every applicable generator over a fresh set of tokens.
    pub fn generate(&self, statement: &StatementContext) -> Result<SqlTokens, Error> {
        let mut tokens = SqlTokens::new();
        self.generate_into(statement, &mut tokens)?;
        Ok(tokens)
    }

    /// Run every applicable generator, keeping tokens already emitted
    /// for this statement.
    pub fn generate_into(
        &self,
        statement: &StatementContext,
        tokens: &mut SqlTokens,
    ) -> Result<(), Error> {
        for generator in &self.generators {
            if generator.applicable(statement) {
                trace!("running \"{}\" token generator", generator.name());
                generator.generate(statement, tokens)?;
            }
        }

        Ok(())
    }
}

impl Default for TokenGenerators {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenGenerators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGenerators")
            .field(
                "generators",
                &self.generators.iter().map(|g| g.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Columns taken from metadata must line up with every row.
pub(crate) fn check_default_columns(insert: &InsertStatementContext) -> Result<(), Error> {
    if !insert.uses_default_columns() {
        return Ok(());
    }

    let columns = insert.column_names().len();
    let mismatch = insert
        .insert_value_contexts()
        .iter()
        .map(|row| row.value_expressions().len())
        .find(|&values| values != columns);

    match mismatch {
        Some(values) => Err(Error::DefaultColumnsMismatch {
            table: insert.table_name().to_string(),
            columns,
            values,
        }),
        None => Ok(()),
    }
}

/// Span covering every `VALUES` segment.
pub(crate) fn values_span(segments: &[ValuesSegment]) -> (usize, usize) {
    let start = segments.iter().map(|s| s.start).min().unwrap_or_default();
    let stop = segments.iter().map(|s| s.stop).max().unwrap_or_default();
    (start, stop)
}
