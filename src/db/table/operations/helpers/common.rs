use tracing::debug;

use crate::db::table::core::row::{Row, RowId};
use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::table::Table;
use crate::db::table::core::value::Value;
use crate::db::table::operations::helpers::where_clause::Filter;
use crate::error::{Error, Result};
use crate::interpreter::ast::Expr;

/// The value an expression stands for, taking placeholders from `params`.
pub fn resolve(expr: &Expr, params: &[Value]) -> Result<Value> {
    match expr {
        Expr::Value(value) => Ok(value.clone()),
        Expr::Placeholder(index) => params.get(*index).cloned().ok_or(Error::ArityMismatch {
            expected: index + 1,
            actual: params.len(),
        }),
    }
}

/// Column positions an INSERT writes, in the order its values are listed.
/// A column may be listed once.
pub fn insert_target_columns(
    schema: &TableSchema,
    columns: &Option<Vec<String>>,
) -> Result<Vec<usize>> {
    let Some(columns) = columns else {
        return Ok((0..schema.width()).collect());
    };
    let mut targets = Vec::with_capacity(columns.len());
    for column in columns {
        let index = schema.get_index_of_column(column)?;
        if targets.contains(&index) {
            return Err(Error::InvalidSchema(format!(
                "Column `{}` is listed more than once in INSERT into `{}`",
                column,
                schema.name()
            )));
        }
        targets.push(index);
    }
    Ok(targets)
}

pub fn check_values_width(schema: &TableSchema, targets: &[usize], values: &[Expr]) -> Result<()> {
    if values.len() != targets.len() {
        return Err(Error::InvalidSchema(format!(
            "INSERT into `{}` lists {} column(s) but {} value(s)",
            schema.name(),
            targets.len(),
            values.len()
        )));
    }
    Ok(())
}

/// Rows of `table` matching `filter`, in insertion order. An equality on the
/// primary key is answered from the index instead of a scan.
pub fn matching_rows<'a>(table: &'a Table, filter: Option<&Filter>) -> Vec<(&'a RowId, &'a Row)> {
    let Some(filter) = filter else {
        return table.scan().collect();
    };
    if let Some(key) = filter.point_key(table.schema()) {
        let id = RowId::new(key);
        debug!(table = table.name(), key = %id, "Primary key lookup");
        return table
            .get_entry(&id)
            .filter(|(_, row)| filter.matches(row))
            .into_iter()
            .collect();
    }
    table.scan().filter(|(_, row)| filter.matches(row)).collect()
}

pub fn matching_row_ids(table: &Table, filter: Option<&Filter>) -> Vec<RowId> {
    matching_rows(table, filter)
        .into_iter()
        .map(|(id, _)| id.clone())
        .collect()
}
