use tracing::{debug, warn};

use crate::db::results::ResultSet;
use crate::db::table::TableHandle;
use crate::db::table::core::row::Row;
use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::value::Value;
use crate::db::table::operations::helpers::common::matching_rows;
use crate::db::table::operations::helpers::order_by_clause::{apply_order_by, sort_keys};
use crate::db::table::operations::helpers::where_clause::Filter;
use crate::error::Result;
use crate::interpreter::ast::{SelectColumns, SelectStatement};

/// Runs a query under the table lock and returns owned rows, so the caller can
/// iterate the result as often as it likes after the lock is gone.
pub fn select(
    handle: &TableHandle,
    statement: &SelectStatement,
    params: &[Value],
    max_rows: Option<usize>,
) -> Result<ResultSet> {
    let schema = handle.schema();
    let projection = projection(schema, &statement.columns)?;
    let filter = statement
        .where_clause
        .as_deref()
        .map(|clause| Filter::compile(schema, clause, params))
        .transpose()?;
    let keys = match &statement.order_by_clause {
        Some(order_by) => sort_keys(schema, order_by)?,
        None => vec![],
    };

    let table = handle.lock();
    let mut rows: Vec<&Row> = matching_rows(&table, filter.as_ref())
        .into_iter()
        .map(|(_, row)| row)
        .collect();
    if !keys.is_empty() {
        apply_order_by(&mut rows, &keys);
    }

    let (offset, limit) = match &statement.limit_clause {
        Some(clause) => (clause.offset.unwrap_or(0), clause.limit),
        None => (0, usize::MAX),
    };
    let mut result: Vec<Row> = rows
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|row| Row(projection.iter().map(|i| row[*i].clone()).collect()))
        .collect();
    drop(table);

    if let Some(max_rows) = max_rows {
        if result.len() > max_rows {
            warn!(
                table = handle.name(),
                rows = result.len(),
                max_rows,
                "Result truncated to max_result_rows"
            );
            result.truncate(max_rows);
        }
    }
    debug!(table = handle.name(), rows = result.len(), "Selected rows");

    let columns = projection
        .iter()
        .map(|i| schema.column(*i).name.clone())
        .collect();
    Ok(ResultSet::new(columns, result))
}

fn projection(schema: &TableSchema, columns: &SelectColumns) -> Result<Vec<usize>> {
    match columns {
        SelectColumns::All => Ok((0..schema.width()).collect()),
        SelectColumns::Columns(columns) => columns
            .iter()
            .map(|column| schema.get_index_of_column(column))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::test_utils::default_database;
    use crate::error::Error;
    use crate::interpreter::ast::{
        Expr, LimitClause, Operator, OrderByClause, OrderByDirection, WhereCondition,
        WhereStackElement,
    };

    fn statement(columns: SelectColumns) -> SelectStatement {
        SelectStatement {
            table_name: "customer".to_string(),
            columns,
            where_clause: None,
            order_by_clause: None,
            limit_clause: None,
        }
    }

    fn names(result: &ResultSet, column: usize) -> Vec<String> {
        result.iter().map(|row| row.get(column).unwrap()).collect()
    }

    #[test]
    fn select_all_in_insertion_order() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let result = select(&handle, &statement(SelectColumns::All), &[], None).unwrap();
        assert_eq!(result.columns, vec!["id", "name", "balance"]);
        assert_eq!(names(&result, 1), vec!["Andi", "Budi", "Citra", "Dewi"]);
    }

    #[test]
    fn select_projects_requested_columns() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let columns = SelectColumns::Columns(vec!["name".to_string(), "id".to_string()]);
        let result = select(&handle, &statement(columns), &[], None).unwrap();
        assert_eq!(result.columns, vec!["name", "id"]);
        assert_eq!(result.rows[0].len(), 2);
        assert_eq!(result.rows[0].get::<i64>(1).unwrap(), 1);
    }

    #[test]
    fn select_filters_orders_and_limits() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let mut statement = statement(SelectColumns::Columns(vec!["name".to_string()]));
        statement.where_clause = Some(vec![WhereStackElement::Condition(WhereCondition {
            column: "balance".to_string(),
            operator: Operator::GreaterThan,
            value: Expr::Placeholder(0),
        })]);
        statement.order_by_clause = Some(OrderByClause {
            columns: vec!["balance".to_string()],
            directions: vec![OrderByDirection::Desc],
        });
        statement.limit_clause = Some(LimitClause {
            limit: 2,
            offset: Some(1),
        });
        let result = select(&handle, &statement, &[Value::Integer(0)], None).unwrap();
        // Budi 250, Andi 100, Dewi 75; skip one, take two.
        assert_eq!(names(&result, 0), vec!["Andi", "Dewi"]);
    }

    #[test]
    fn select_by_primary_key() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let mut statement = statement(SelectColumns::All);
        statement.where_clause = Some(vec![WhereStackElement::Condition(WhereCondition {
            column: "id".to_string(),
            operator: Operator::Equals,
            value: Expr::Value(Value::Integer(3)),
        })]);
        let result = select(&handle, &statement, &[], None).unwrap();
        assert_eq!(names(&result, 1), vec!["Citra"]);
    }

    #[test]
    fn max_rows_truncates() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let result = select(&handle, &statement(SelectColumns::All), &[], Some(3)).unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let database = default_database();
        let handle = database.table("customer").unwrap();
        let columns = SelectColumns::Columns(vec!["email".to_string()]);
        assert!(matches!(
            select(&handle, &statement(columns), &[], None),
            Err(Error::ColumnNotFound { .. })
        ));
    }
}
