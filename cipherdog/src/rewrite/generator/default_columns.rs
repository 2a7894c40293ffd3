use super::{check_default_columns, Error, SqlTokens, TokenGenerator};
use crate::rewrite::UseDefaultInsertColumnsToken;
use crate::statement::StatementContext;

/// Writes out the column list of an `INSERT` that omitted it.
#[derive(Debug, Default, Clone, Copy)]
pub struct UseDefaultInsertColumnsTokenGenerator;

impl TokenGenerator for UseDefaultInsertColumnsTokenGenerator {
    fn name(&self) -> &'static str {
        "use_default_insert_columns"
    }

    fn applicable(&self, statement: &StatementContext) -> bool {
        statement
            .insert()
            .map(|insert| insert.uses_default_columns() && insert.values_start().is_some())
            .unwrap_or(false)
    }

    fn generate(&self, statement: &StatementContext, tokens: &mut SqlTokens) -> Result<(), Error> {
        if tokens.use_default_insert_columns().is_some() {
            return Ok(());
        }

        if let Some(insert) = statement.insert() {
            check_default_columns(insert)?;

            if let Some(start) = insert.values_start() {
                tokens.insert(UseDefaultInsertColumnsToken::new(
                    start,
                    insert.column_names().to_vec(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metadata::TableMetas;
    use crate::statement::parse;

    #[test]
    fn test_default_columns() {
        let metas = TableMetas::default().with("t_user", ["id", "pwd"]);
        let generator = UseDefaultInsertColumnsTokenGenerator;

        let statement = parse("INSERT INTO t_user VALUES (1, 'secret')", &[], &metas).unwrap();
        assert!(generator.applicable(&statement));

        let mut tokens = SqlTokens::new();
        generator.generate(&statement, &mut tokens).unwrap();
        let token = tokens.use_default_insert_columns().unwrap();
        assert_eq!(token.start, 19);
        assert_eq!(token.columns, vec!["id", "pwd"]);

        let statement =
            parse("INSERT INTO t_user (id, pwd) VALUES (1, 'secret')", &[], &metas).unwrap();
        assert!(!generator.applicable(&statement));
    }

    #[test]
    fn test_unknown_table() {
        let statement =
            parse("INSERT INTO t_order VALUES (1, 'secret')", &[], &TableMetas::default()).unwrap();
        let generator = UseDefaultInsertColumnsTokenGenerator;
        assert!(generator.applicable(&statement));

        let mut tokens = SqlTokens::new();
        let err = generator.generate(&statement, &mut tokens).unwrap_err();
        assert!(matches!(
            err,
            Error::DefaultColumnsMismatch {
                columns: 0,
                values: 2,
                ..
            }
        ));
        assert!(tokens.is_empty());
    }
}
