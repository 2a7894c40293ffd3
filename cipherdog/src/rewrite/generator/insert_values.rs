use tracing::debug;

use super::{values_span, Error, SqlTokens, TokenGenerator};
use crate::rewrite::{InsertValueToken, InsertValuesToken};
use crate::route::DataNode;
use crate::statement::StatementContext;

/// Emits the `VALUES` token with the data nodes each row is routed to.
#[derive(Debug, Default, Clone)]
pub struct InsertValuesTokenGenerator {
    /// Data nodes, one entry per row.
    data_nodes: Vec<Vec<DataNode>>,
}

impl InsertValuesTokenGenerator {
    pub fn new(data_nodes: Vec<Vec<DataNode>>) -> Self {
        Self { data_nodes }
    }

    fn row_data_nodes(&self, row: usize) -> Vec<DataNode> {
        self.data_nodes.get(row).cloned().unwrap_or_default()
    }
}

impl TokenGenerator for InsertValuesTokenGenerator {
    fn name(&self) -> &'static str {
        "insert_values"
    }

    fn applicable(&self, statement: &StatementContext) -> bool {
        statement.insert_with_values().is_some()
    }

    fn generate(&self, statement: &StatementContext, tokens: &mut SqlTokens) -> Result<(), Error> {
        let Some(insert) = statement.insert_with_values() else {
            return Ok(());
        };

        if let Some(token) = tokens.insert_values_mut() {
            for (row, value_token) in token.insert_value_tokens.iter_mut().enumerate() {
                value_token.data_nodes = self.row_data_nodes(row);
            }
            return Ok(());
        }

        let (start, stop) = values_span(insert.values_segments());
        let mut token = InsertValuesToken::new(start, stop);
        token.insert_value_tokens = insert
            .insert_value_contexts()
            .iter()
            .enumerate()
            .map(|(row, context)| {
                InsertValueToken::new(
                    context.value_expressions().to_vec(),
                    self.row_data_nodes(row),
                )
            })
            .collect();

        debug!(
            "insert values token for \"{}\" [{} rows]",
            insert.table_name(),
            token.insert_value_tokens.len()
        );
        tokens.insert(token);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metadata::TableMetas;
    use crate::statement::parse;

    #[test]
    fn test_data_nodes_per_row() {
        let query = "INSERT INTO t_order (order_id) VALUES (1), (2)";
        let statement = parse(query, &[], &TableMetas::default()).unwrap();
        let generator =
            InsertValuesTokenGenerator::new(vec![vec![DataNode::new("db_1", "t_order_1")]]);

        let mut tokens = SqlTokens::new();
        generator.generate(&statement, &mut tokens).unwrap();

        let token = tokens.insert_values().unwrap();
        assert_eq!(&query[token.start..=token.stop], "(1), (2)");
        assert_eq!(
            token.insert_value_tokens[0].data_nodes,
            vec![DataNode::new("db_1", "t_order_1")]
        );
        assert!(token.insert_value_tokens[1].data_nodes.is_empty());
        assert_eq!(token.insert_value_tokens[1].values.len(), 1);
    }
}
