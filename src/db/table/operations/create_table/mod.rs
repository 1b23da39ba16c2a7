use crate::db::database::Database;
use crate::db::table::core::schema::TableSchema;
use crate::db::transactions::UndoEntry;
use crate::error::{Error, Result};
use crate::interpreter::ast::{CreateTableStatement, ExistenceCheck};

/// Creates the table. Returns the undo entry, or `None` when `IF NOT EXISTS`
/// found the table already there.
pub fn create_table(
    database: &Database,
    statement: &CreateTableStatement,
) -> Result<Option<UndoEntry>> {
    let schema = TableSchema::new(statement.table_name.clone(), statement.columns.clone())?;
    match database.create_table(schema) {
        Ok(table) => Ok(Some(UndoEntry::CreateTable { table })),
        Err(Error::TableExists(_))
            if statement.existence_check == Some(ExistenceCheck::IfNotExists) =>
        {
            Ok(None)
        }
        Err(error) => Err(error),
    }
}
