use std::sync::Arc;

use tracing::debug;

use crate::db::results::ExecuteResult;
use crate::db::table::TableHandle;
use crate::db::table::core::value::Value;
use crate::db::table::operations::Applied;
use crate::db::table::operations::helpers::common::matching_row_ids;
use crate::db::table::operations::helpers::where_clause::Filter;
use crate::db::transactions::UndoEntry;
use crate::db::transactions::rollback::revert_statement;
use crate::error::Result;
use crate::interpreter::ast::DeleteStatement;

/// Deletes matching rows. Each undo entry keeps the row's position so a
/// rollback puts it back in scan order.
pub fn delete(
    handle: &Arc<TableHandle>,
    statement: &DeleteStatement,
    params: &[Value],
) -> Result<Applied> {
    let filter = statement
        .where_clause
        .as_deref()
        .map(|clause| Filter::compile(handle.schema(), clause, params))
        .transpose()?;

    let mut table = handle.lock();
    let targets = matching_row_ids(&table, filter.as_ref());
    let mut undo = Vec::with_capacity(targets.len());
    for id in targets {
        match table.delete(&id) {
            Ok((position, row)) => undo.push(UndoEntry::Delete {
                table: Arc::clone(handle),
                row_id: id,
                position,
                row,
            }),
            Err(error) => {
                revert_statement(&mut table, undo);
                return Err(error);
            }
        }
    }
    debug!(table = handle.name(), rows = undo.len(), "Deleted rows");

    Ok(Applied {
        result: ExecuteResult::affected(undo.len()),
        undo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::core::row::Row;
    use crate::db::table::test_utils::{customer_row, default_database};
    use crate::interpreter::ast::{Expr, Operator, WhereCondition, WhereStackElement};

    fn rows(handle: &TableHandle) -> Vec<Row> {
        handle.lock().scan().map(|(_, row)| row.clone()).collect()
    }

    #[test]
    fn delete_with_where_clause() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let statement = DeleteStatement {
            table_name: "customer".to_string(),
            where_clause: Some(vec![WhereStackElement::Condition(WhereCondition {
                column: "balance".to_string(),
                operator: Operator::LessThan,
                value: Expr::Placeholder(0),
            })]),
        };
        let applied = delete(&handle, &statement, &[Value::Integer(100)]).unwrap();
        assert_eq!(applied.result.rows_affected, 2);
        assert_eq!(
            rows(&handle),
            vec![customer_row(1, "Andi", 100), customer_row(2, "Budi", 250)]
        );
        match &applied.undo[0] {
            UndoEntry::Delete { position, row, .. } => {
                assert_eq!(*position, 2);
                assert_eq!(*row, customer_row(3, "Citra", 0));
            }
            other => panic!("unexpected undo entry {:?}", other),
        }
    }

    #[test]
    fn delete_everything() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let statement = DeleteStatement {
            table_name: "customer".to_string(),
            where_clause: None,
        };
        let applied = delete(&handle, &statement, &[]).unwrap();
        assert_eq!(applied.result.rows_affected, 4);
        assert!(rows(&handle).is_empty());
    }

    #[test]
    fn delete_matching_nothing_is_not_an_error() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let statement = DeleteStatement {
            table_name: "customer".to_string(),
            where_clause: Some(vec![WhereStackElement::Condition(WhereCondition {
                column: "id".to_string(),
                operator: Operator::Equals,
                value: Expr::Value(Value::Integer(99)),
            })]),
        };
        let applied = delete(&handle, &statement, &[]).unwrap();
        assert_eq!(applied.result.rows_affected, 0);
        assert_eq!(rows(&handle).len(), 4);
    }
}
