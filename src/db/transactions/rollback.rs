use tracing::{debug, warn};

use crate::db::database::Database;
use crate::db::table::core::table::Table;
use crate::db::transactions::UndoEntry;
use crate::error::{Error, Result};

/// Replays a transaction's undo log newest first. An entry whose target is
/// already gone is logged and skipped; any other failure is remembered and
/// replay carries on, so the first such error is what the caller sees.
pub fn rollback_entries(database: &Database, entries: Vec<UndoEntry>) -> Result<()> {
    let mut first_error = None;
    for entry in entries.into_iter().rev() {
        if let Err(error) = rollback_entry(database, entry) {
            match error {
                Error::NotFound { .. } | Error::TableNotFound(_) => {
                    warn!(%error, "Undo entry target is gone, skipping");
                }
                error => {
                    warn!(%error, "Undo entry failed");
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn rollback_entry(database: &Database, entry: UndoEntry) -> Result<()> {
    match entry {
        UndoEntry::CreateTable { table } => {
            if !database.unregister_table_if_same(&table) {
                return Err(Error::TableNotFound(table.name().to_string()));
            }
            debug!(table = table.name(), "Undid CREATE TABLE");
            Ok(())
        }
        UndoEntry::DropTable { table } => {
            let name = table.name().to_string();
            database.register_table(table)?;
            debug!(table = %name, "Undid DROP TABLE");
            Ok(())
        }
        row_entry => {
            let table = row_entry.table().clone();
            let mut guard = table.lock();
            undo_row_entry(&mut guard, row_entry)
        }
    }
}

/// Reverts the row changes a statement made to a table it still has locked.
/// Used when a multi-row statement fails partway.
pub fn revert_statement(table: &mut Table, entries: Vec<UndoEntry>) {
    for entry in entries.into_iter().rev() {
        if let Err(error) = undo_row_entry(table, entry) {
            warn!(%error, table = table.name(), "Could not revert partial statement");
        }
    }
}

fn undo_row_entry(table: &mut Table, entry: UndoEntry) -> Result<()> {
    match entry {
        UndoEntry::Insert { row_id, .. } => table.delete(&row_id).map(|_| ()),
        UndoEntry::Delete {
            row_id,
            position,
            row,
            ..
        } => table.restore(position, row_id, row),
        UndoEntry::Update {
            row_id,
            previous_id,
            previous,
            ..
        } => table.update(&row_id, previous_id, previous).map(|_| ()),
        UndoEntry::CreateTable { table: handle } | UndoEntry::DropTable { table: handle } => {
            Err(Error::InvalidSchema(format!(
                "Schema change on `{}` cannot be reverted row by row",
                handle.name()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::core::row::RowId;
    use crate::db::table::core::value::Value;
    use crate::db::table::test_utils::{customer_handle, customer_row};

    #[test]
    fn revert_statement_undoes_in_reverse_order() {
        let handle = customer_handle();
        let mut table = handle.lock();
        let first = RowId::new(Value::Integer(1));
        let second = RowId::new(Value::Integer(2));
        table.insert(first.clone(), customer_row(1, "Andi", 10)).unwrap();
        table.insert(second.clone(), customer_row(2, "Budi", 20)).unwrap();
        let (position, row) = table.delete(&first).unwrap();

        let entries = vec![
            UndoEntry::Insert {
                table: handle.clone(),
                row_id: first.clone(),
            },
            UndoEntry::Insert {
                table: handle.clone(),
                row_id: second.clone(),
            },
            UndoEntry::Delete {
                table: handle.clone(),
                row_id: first.clone(),
                position,
                row,
            },
        ];
        revert_statement(&mut table, entries);
        assert!(table.is_empty());
    }

    #[test]
    fn update_entry_restores_previous_key_and_image() {
        let handle = customer_handle();
        let mut table = handle.lock();
        let old = RowId::new(Value::Integer(1));
        let new = RowId::new(Value::Integer(9));
        table.insert(old.clone(), customer_row(1, "Andi", 10)).unwrap();
        let previous = table.update(&old, new.clone(), customer_row(9, "Andi", 99)).unwrap();

        undo_row_entry(
            &mut table,
            UndoEntry::Update {
                table: handle.clone(),
                row_id: new,
                previous_id: old.clone(),
                previous,
            },
        )
        .unwrap();
        assert_eq!(table.get(&old), Some(&customer_row(1, "Andi", 10)));
    }

    #[test]
    fn missing_row_reports_not_found() {
        let handle = customer_handle();
        let mut table = handle.lock();
        let result = undo_row_entry(
            &mut table,
            UndoEntry::Insert {
                table: handle.clone(),
                row_id: RowId::new(Value::Integer(42)),
            },
        );
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
