use std::sync::Arc;

use tracing::debug;

use crate::db::results::ExecuteResult;
use crate::db::table::TableHandle;
use crate::db::table::core::column::DefaultValue;
use crate::db::table::core::row::{Row, RowId};
use crate::db::table::core::value::Value;
use crate::db::table::operations::Applied;
use crate::db::table::operations::helpers::common::{
    check_values_width, insert_target_columns, resolve,
};
use crate::db::transactions::UndoEntry;
use crate::db::transactions::rollback::revert_statement;
use crate::error::Result;
use crate::interpreter::ast::{Expr, InsertIntoStatement};

/// Inserts every VALUES row. Either all rows land or none do.
pub fn insert(
    handle: &Arc<TableHandle>,
    statement: &InsertIntoStatement,
    params: &[Value],
) -> Result<Applied> {
    let targets = insert_target_columns(handle.schema(), &statement.columns)?;

    let mut rows = Vec::with_capacity(statement.values.len());
    let mut last_insert_id = None;
    for values in &statement.values {
        check_values_width(handle.schema(), &targets, values)?;
        let (id, row, assigned) = build_row(handle, &targets, values, params)?;
        if assigned.is_some() {
            last_insert_id = assigned;
        }
        rows.push((id, row));
    }

    let mut table = handle.lock();
    let mut undo = Vec::with_capacity(rows.len());
    for (id, row) in rows {
        if let Err(error) = table.insert(id.clone(), row) {
            revert_statement(&mut table, undo);
            return Err(error);
        }
        undo.push(UndoEntry::Insert {
            table: Arc::clone(handle),
            row_id: id,
        });
    }
    debug!(table = handle.name(), rows = undo.len(), "Inserted rows");

    Ok(Applied {
        result: ExecuteResult {
            rows_affected: undo.len(),
            last_insert_id,
        },
        undo,
    })
}

// Full row in schema order plus its key. The third element is the key the
// allocator assigned, if it assigned one.
fn build_row(
    handle: &TableHandle,
    targets: &[usize],
    values: &[Expr],
    params: &[Value],
) -> Result<(RowId, Row, Option<i64>)> {
    let schema = handle.schema();
    let mut supplied: Vec<Option<Value>> = vec![None; schema.width()];
    for (target, expr) in targets.iter().zip(values) {
        supplied[*target] = Some(resolve(expr, params)?);
    }

    let key_column = schema.primary_key_index();
    let mut row = Vec::with_capacity(schema.width());
    for (i, (column, value)) in schema.columns().iter().zip(supplied).enumerate() {
        let value = match value {
            Some(value) => value,
            None => column
                .default
                .as_ref()
                .map(DefaultValue::evaluate)
                .unwrap_or(Value::Null),
        };
        if key_column == Some(i) && column.assigns_surrogate_key() && value.is_null() {
            // Filled from the allocator once the rest of the row is valid.
            row.push(Value::Null);
            continue;
        }
        row.push(column.admit(schema.name(), &value)?);
    }

    let allocator = handle.auto_increment();
    let (id, assigned) = match key_column {
        Some(k) if row[k].is_null() => {
            let key = allocator.next();
            row[k] = Value::Integer(key);
            (RowId::new(Value::Integer(key)), Some(key))
        }
        Some(k) => {
            if let Value::Integer(key) = &row[k] {
                allocator.observe(*key);
            }
            (RowId::new(row[k].clone()), None)
        }
        // Hidden surrogate key for tables without a declared one.
        None => (RowId::new(Value::Integer(allocator.next())), None),
    };
    Ok((id, Row(row), assigned))
}
