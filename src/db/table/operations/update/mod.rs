use std::sync::Arc;

use tracing::debug;

use crate::db::results::ExecuteResult;
use crate::db::table::TableHandle;
use crate::db::table::core::row::{Row, RowId};
use crate::db::table::core::value::Value;
use crate::db::table::operations::Applied;
use crate::db::table::operations::helpers::common::{matching_row_ids, resolve};
use crate::db::table::operations::helpers::where_clause::Filter;
use crate::db::transactions::UndoEntry;
use crate::db::transactions::rollback::revert_statement;
use crate::error::Result;
use crate::interpreter::ast::UpdateStatement;

pub fn update(
    handle: &Arc<TableHandle>,
    statement: &UpdateStatement,
    params: &[Value],
) -> Result<Applied> {
    let schema = handle.schema();
    let mut assignments = Vec::with_capacity(statement.update_values.len());
    for update_value in &statement.update_values {
        let index = schema.get_index_of_column(&update_value.column)?;
        let value = resolve(&update_value.value, params)?;
        assignments.push((index, schema.column(index).admit(schema.name(), &value)?));
    }
    let filter = statement
        .where_clause
        .as_deref()
        .map(|clause| Filter::compile(schema, clause, params))
        .transpose()?;
    let key_column = schema.primary_key_index();

    let mut table = handle.lock();
    let targets = matching_row_ids(&table, filter.as_ref());
    let mut undo = Vec::with_capacity(targets.len());
    for id in targets {
        let Some(current) = table.get(&id) else {
            continue;
        };
        let mut row: Row = current.clone();
        for (index, value) in &assignments {
            row[*index] = value.clone();
        }
        let new_id = match key_column {
            Some(k) => RowId::new(row[k].clone()),
            None => id.clone(),
        };
        match table.update(&id, new_id.clone(), row) {
            Ok(previous) => undo.push(UndoEntry::Update {
                table: Arc::clone(handle),
                row_id: new_id,
                previous_id: id,
                previous,
            }),
            Err(error) => {
                revert_statement(&mut table, undo);
                return Err(error);
            }
        }
    }
    drop(table);

    if let Some(k) = key_column {
        if let Some((_, Value::Integer(key))) = assignments.iter().find(|(index, _)| *index == k) {
            handle.auto_increment().observe(*key);
        }
    }
    debug!(table = handle.name(), rows = undo.len(), "Updated rows");

    Ok(Applied {
        result: ExecuteResult::affected(undo.len()),
        undo,
    })
}
