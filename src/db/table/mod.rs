use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::db::table::auto_increment::AutoIncrement;
use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::table::Table;

pub mod auto_increment;
pub mod core;
pub mod index;
pub mod operations;
#[cfg(test)]
pub mod test_utils;

/// A table as shared between sessions. The row store sits behind an
/// exclusive lock held for one statement at a time; the auto-increment
/// counter lives outside that lock.
#[derive(Debug)]
pub struct TableHandle {
    schema: Arc<TableSchema>,
    auto_increment: AutoIncrement,
    data: Mutex<Table>,
}

impl TableHandle {
    pub fn new(schema: TableSchema) -> Self {
        let schema = Arc::new(schema);
        Self {
            data: Mutex::new(Table::new(Arc::clone(&schema))),
            schema,
            auto_increment: AutoIncrement::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    pub fn auto_increment(&self) -> &AutoIncrement {
        &self.auto_increment
    }

    pub fn lock(&self) -> MutexGuard<'_, Table> {
        self.data.lock()
    }
}
