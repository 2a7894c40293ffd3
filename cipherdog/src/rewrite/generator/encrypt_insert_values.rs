//! Encrypt values of `INSERT ... VALUES`.
//!
//! For every encrypted column of every row:
//!
//! 1. the plain column value, if configured, is inserted right after the column,
//! 2. the assisted query value, if configured, is inserted after that,
//! 3. the original literal is replaced with its ciphertext.
//!
//! Rows with bound parameters get placeholders instead of values in
//! steps 1 and 2, and placeholders are never replaced in step 3. Their
//! values are encrypted when parameters are bound.

use std::sync::Arc;

use tracing::{debug, info, trace};

use super::{check_default_columns, values_span, Error, SqlTokens, TokenGenerator};
use crate::encryptor::ShardingEncryptor;
use crate::rewrite::{InsertValueToken, InsertValuesToken, UseDefaultInsertColumnsToken};
use crate::rule::Rules;
use crate::statement::{
    count_placeholders, ExpressionSegment, InsertStatementContext, InsertValueContext,
    StatementContext, Value,
};

#[derive(Debug, Clone)]
pub struct EncryptInsertValuesTokenGenerator {
    rules: Arc<Rules>,
}

impl EncryptInsertValuesTokenGenerator {
    pub fn new(rules: Arc<Rules>) -> Self {
        Self { rules }
    }

    fn encrypt_row(
        &self,
        insert: &InsertStatementContext,
        default_columns: Option<&UseDefaultInsertColumnsToken>,
        row: &InsertValueContext,
        token: &mut InsertValueToken,
    ) -> Result<(), Error> {
        let table = insert.table_name();
        let rule = &self.rules.encrypt;

        // Last column first, so inserting after a column
        // doesn't move columns we haven't seen yet.
        for column in insert.descending_column_names() {
            let Some(encryptor) = rule.find_sharding_encryptor(table, column) else {
                continue;
            };

            let index = match default_columns {
                Some(default_columns) => default_columns.column_index(column),
                None => insert.column_index(column),
            }
            .ok_or_else(|| Error::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            })?;

            let original = row.value(index)?;
            let mut position = index + 1;

            if rule.find_plain_column(table, column).is_some() {
                let derived = derived(row, token, || original.clone());
                insert_at(token, position, derived);
                position += 1;
            }

            if rule.find_assisted_query_column(table, column).is_some() {
                let assisted = encryptor.assisted_query().ok_or_else(|| {
                    Error::AssistedQueryUnsupported {
                        table: table.to_string(),
                        column: column.to_string(),
                    }
                })?;
                let derived = derived(row, token, || {
                    Value::from(assisted.query_assisted_encrypt(original.as_text().as_deref()))
                });
                insert_at(token, position, derived);
            }

            replace_literal(token, row, index, encryptor.as_ref(), &original)?;

            trace!(
                "encrypted \"{}.{}\" at index {} [{} values]",
                table,
                column,
                index,
                token.values.len()
            );
        }

        Ok(())
    }
}

/// Literal for rows without parameters, placeholder for rows with them.
/// The placeholder takes the next parameter slot of the row.
fn derived(
    row: &InsertValueContext,
    token: &InsertValueToken,
    value: impl FnOnce() -> Value,
) -> ExpressionSegment {
    if row.parameters().is_empty() {
        ExpressionSegment::DerivedLiteral { value: value() }
    } else {
        ExpressionSegment::DerivedParameterMarker {
            index: count_placeholders(&token.values),
        }
    }
}

fn insert_at(token: &mut InsertValueToken, position: usize, expression: ExpressionSegment) {
    let position = position.min(token.values.len());
    token.values.insert(position, expression);
}

/// Replace the original literal with ciphertext, keeping its span.
fn replace_literal(
    token: &mut InsertValueToken,
    row: &InsertValueContext,
    index: usize,
    encryptor: &dyn ShardingEncryptor,
    original: &Value,
) -> Result<(), Error> {
    if let Some(ExpressionSegment::Literal { start, stop, .. }) =
        row.value_expressions().get(index)
    {
        if let Some(slot) = token.values.get_mut(index) {
            *slot = ExpressionSegment::literal(*start, *stop, encryptor.encrypt(original)?);
        }
    }

    Ok(())
}

impl TokenGenerator for EncryptInsertValuesTokenGenerator {
    fn name(&self) -> &'static str {
        "encrypt_insert_values"
    }

    fn applicable(&self, statement: &StatementContext) -> bool {
        statement
            .insert_with_values()
            .map(|insert| {
                self.rules
                    .encrypt
                    .find_encrypt_table(insert.table_name())
                    .is_some()
            })
            .unwrap_or(false)
    }

    fn generate(&self, statement: &StatementContext, tokens: &mut SqlTokens) -> Result<(), Error> {
        let Some(insert) = statement.insert_with_values() else {
            return Ok(());
        };
        check_default_columns(insert)?;
        let default_columns = tokens.use_default_insert_columns().cloned();

        if let Some(token) = tokens.insert_values_mut() {
            debug!("encrypting existing insert values token for \"{}\"", insert.table_name());

            for (row, value_token) in insert
                .insert_value_contexts()
                .iter()
                .zip(token.insert_value_tokens.iter_mut())
            {
                self.encrypt_row(insert, default_columns.as_ref(), row, value_token)?;
            }

            return Ok(());
        }

        let (start, stop) = values_span(insert.values_segments());
        let mut token = InsertValuesToken::new(start, stop);

        for row in insert.insert_value_contexts() {
            let mut value_token = InsertValueToken::new(row.value_expressions().to_vec(), vec![]);
            self.encrypt_row(insert, default_columns.as_ref(), row, &mut value_token)?;
            token.insert_value_tokens.push(value_token);
        }

        if self.rules.props.sql_show() {
            info!("encrypted insert values for \"{}\": {:?}", insert.table_name(), token);
        } else {
            debug!(
                "encrypted insert values for \"{}\" [{} rows]",
                insert.table_name(),
                token.insert_value_tokens.len()
            );
        }
        tokens.insert(token);

        Ok(())
    }
}
