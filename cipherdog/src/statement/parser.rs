//! Build a statement context from query text.
//!
//! The AST tells us what each `VALUES` expression is, the scanner
//! tells us where it is. Both walk the rows in the same order, so
//! the two are zipped together.

use pg_query::protobuf::{InsertStmt, ScanToken, Token};
use pg_query::{Node, NodeEnum};
use tracing::trace;

use crate::metadata::TableMetas;

use super::{
    CommonStatementContext, Error, ExpressionSegment, InsertStatementContext, InsertValueContext,
    StatementContext, Value, ValuesSegment,
};

/// Parse a statement.
///
/// `parameters` are the values bound to `$1`, `$2`, etc. Leave empty
/// for simple queries or if the statement hasn't been bound yet.
pub fn parse(
    query: &str,
    parameters: &[Value],
    table_metas: &TableMetas,
) -> Result<StatementContext, Error> {
    let ast = pg_query::parse(query)?;
    let root = ast
        .protobuf
        .stmts
        .first()
        .and_then(|stmt| stmt.stmt.as_ref())
        .ok_or(Error::EmptyQuery)?;

    match root.node.as_ref() {
        Some(NodeEnum::InsertStmt(insert)) => {
            Ok(insert_context(query, insert, parameters, table_metas)?.into())
        }
        _ => Ok(StatementContext::Common(CommonStatementContext::new(
            ast.tables(),
        ))),
    }
}

fn insert_context(
    query: &str,
    insert: &InsertStmt,
    parameters: &[Value],
    table_metas: &TableMetas,
) -> Result<InsertStatementContext, Error> {
    let relation = insert.relation.as_ref().ok_or(Error::NoTable)?;
    let table = relation.relname.clone();
    let relation_start = relation.location.max(0) as usize;

    let columns = insert
        .cols
        .iter()
        .filter_map(|col| match col.node.as_ref() {
            Some(NodeEnum::ResTarget(target)) => Some(target.name.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();

    let values_lists = values_lists(insert);
    let (values_start, segments, rows) = if values_lists.is_empty() {
        (None, vec![], vec![])
    } else {
        let scan = pg_query::scan(query)?;
        let values = values_keyword(&scan.tokens, relation_start);
        let values_start = values.map(|position| scan.tokens[position].start as usize);
        let spans = values
            .map(|position| row_spans(&scan.tokens[position + 1..]))
            .unwrap_or_default();
        trace!("values spans: {:?}", spans);

        let mut segments = Vec::with_capacity(values_lists.len());
        let mut rows = Vec::with_capacity(values_lists.len());

        for (row, items) in values_lists.iter().enumerate() {
            let span = spans.get(row).ok_or(Error::ValuesMismatch {
                row,
                expected: items.len(),
                found: 0,
            })?;
            if span.items.len() != items.len() {
                return Err(Error::ValuesMismatch {
                    row,
                    expected: items.len(),
                    found: span.items.len(),
                });
            }

            let expressions = items
                .iter()
                .zip(span.items.iter())
                .map(|(item, &(start, stop))| expression(query, item, start, stop))
                .collect::<Vec<_>>();
            let row_parameters = row_parameters(&expressions, parameters)?;

            segments.push(ValuesSegment::new(span.start, span.stop));
            rows.push(InsertValueContext::new(expressions, row_parameters));
        }

        (values_start, segments, rows)
    };

    let context = InsertStatementContext::new(table, columns, table_metas, segments, rows);
    Ok(match values_start {
        Some(values_start) => context.with_values_start(values_start),
        None => context,
    })
}

/// Expressions of each `VALUES` row.
fn values_lists(insert: &InsertStmt) -> Vec<&[Node]> {
    let select = insert.select_stmt.as_ref().and_then(|s| s.node.as_ref());
    if let Some(NodeEnum::SelectStmt(select)) = select {
        select
            .values_lists
            .iter()
            .filter_map(|list| match list.node.as_ref() {
                Some(NodeEnum::List(list)) => Some(list.items.as_slice()),
                _ => None,
            })
            .collect()
    } else {
        vec![]
    }
}

#[derive(Debug, Default, Clone)]
struct RowSpan {
    start: usize,
    stop: usize,
    items: Vec<(usize, usize)>,
}

/// Position of the `VALUES` keyword belonging to the `INSERT` itself.
///
/// `VALUES` can also appear in a CTE before the target table or inside
/// parentheses, e.g. a subquery. Neither of those is the row list.
fn values_keyword(tokens: &[ScanToken], relation_start: usize) -> Option<usize> {
    let mut depth = 0;

    for (position, token) in tokens.iter().enumerate() {
        if (token.start as usize) < relation_start {
            continue;
        }

        match token.token {
            t if t == '(' as i32 => depth += 1,
            t if t == ')' as i32 => depth -= 1,
            t if t == Token::Values as i32 && depth == 0 => return Some(position),
            _ => (),
        }
    }

    None
}

/// Find every `(...)` row in the tokens following `VALUES` and the span
/// of each expression in it. Stops at the first top-level token that isn't
/// part of the row list, e.g. `ON CONFLICT` or `RETURNING`.
fn row_spans(tokens: &[ScanToken]) -> Vec<RowSpan> {
    let mut rows = vec![];
    let mut depth = 0;
    let mut row = RowSpan::default();
    let mut item: Option<(usize, usize)> = None;

    for token in tokens
        .iter()
        .filter(|t| t.token != Token::CComment as i32 && t.token != Token::SqlComment as i32)
    {
        let (start, end) = (token.start as usize, token.end as usize);

        match (token.token, depth) {
            (t, 0) if t == '(' as i32 => {
                depth = 1;
                row = RowSpan {
                    start,
                    ..Default::default()
                };
            }
            (t, 1) if t == ')' as i32 => {
                depth = 0;
                row.items.extend(item.take());
                row.stop = end - 1;
                rows.push(std::mem::take(&mut row));
            }
            (t, 1) if t == ',' as i32 => {
                row.items.extend(item.take());
            }
            (t, 0) if t == ',' as i32 => (),
            (_, 0) => break,
            (t, _) => {
                if t == '(' as i32 {
                    depth += 1;
                } else if t == ')' as i32 {
                    depth -= 1;
                }
                let stop = end - 1;
                item = Some(match item {
                    Some((item_start, _)) => (item_start, stop),
                    None => (start, stop),
                });
            }
        }
    }

    rows
}

fn expression(query: &str, node: &Node, start: usize, stop: usize) -> ExpressionSegment {
    match node.node.as_ref() {
        Some(NodeEnum::AConst(value)) => {
            ExpressionSegment::literal(start, stop, Value::from(value))
        }
        Some(NodeEnum::ParamRef(param)) if param.number > 0 => {
            ExpressionSegment::parameter_marker(start, stop, param.number as usize - 1)
        }
        Some(NodeEnum::TypeCast(cast)) => match cast.arg.as_ref().and_then(|a| a.node.as_ref()) {
            Some(NodeEnum::AConst(value)) => {
                ExpressionSegment::literal(start, stop, Value::from(value))
            }
            Some(NodeEnum::ParamRef(param)) if param.number > 0 => {
                ExpressionSegment::parameter_marker(start, stop, param.number as usize - 1)
            }
            _ => complex(query, start, stop),
        },
        _ => complex(query, start, stop),
    }
}

fn complex(query: &str, start: usize, stop: usize) -> ExpressionSegment {
    ExpressionSegment::Complex {
        start,
        stop,
        text: query.get(start..=stop).unwrap_or_default().to_string(),
    }
}

/// Parameters used by a row, in the order its placeholders appear.
fn row_parameters(
    expressions: &[ExpressionSegment],
    parameters: &[Value],
) -> Result<Vec<Value>, Error> {
    if parameters.is_empty() {
        return Ok(vec![]);
    }

    expressions
        .iter()
        .filter_map(|e| match e {
            ExpressionSegment::ParameterMarker { index, .. } => Some(*index),
            _ => None,
        })
        .map(|index| {
            parameters
                .get(index)
                .cloned()
                .ok_or(Error::MissingParameter(index))
        })
        .collect()
}
