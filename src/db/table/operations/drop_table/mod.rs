use crate::db::database::Database;
use crate::db::transactions::UndoEntry;
use crate::error::{Error, Result};
use crate::interpreter::ast::{DropTableStatement, ExistenceCheck};

/// Unregisters the table. The handle, rows included, lives on in the undo
/// entry so a rollback can bring it back whole.
pub fn drop_table(
    database: &Database,
    statement: &DropTableStatement,
) -> Result<Option<UndoEntry>> {
    match database.drop_table(&statement.table_name) {
        Ok(table) => Ok(Some(UndoEntry::DropTable { table })),
        Err(Error::TableNotFound(_))
            if statement.existence_check == Some(ExistenceCheck::IfExists) =>
        {
            Ok(None)
        }
        Err(error) => Err(error),
    }
}
