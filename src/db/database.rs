use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::info;

use crate::config::EngineConfig;
use crate::db::session::Session;
use crate::db::table::TableHandle;
use crate::db::table::core::schema::TableSchema;
use crate::db::transactions::TransactionId;
use crate::error::{Error, Result};

/// The catalog of tables shared by every session. Lookups take the catalog
/// read lock only long enough to clone a table handle.
#[derive(Debug)]
pub struct Database {
    config: EngineConfig,
    tables: RwLock<HashMap<String, Arc<TableHandle>>>,
    next_transaction_id: AtomicU64,
}

impl Database {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(HashMap::new()),
            next_transaction_id: AtomicU64::new(1),
        }
    }

    /// A database ready to be shared between sessions.
    pub fn open(config: EngineConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn open_session(self: &Arc<Self>) -> Session {
        Session::new(Arc::clone(self))
    }

    /// Registers a new, empty table. Outside any transaction.
    pub fn create_table(&self, schema: TableSchema) -> Result<Arc<TableHandle>> {
        let table = Arc::new(TableHandle::new(schema));
        self.register_table(Arc::clone(&table))?;
        info!(table = table.name(), columns = table.schema().width(), "Created table");
        Ok(table)
    }

    /// Unregisters the table and hands back its handle.
    pub fn drop_table(&self, name: &str) -> Result<Arc<TableHandle>> {
        let table = self
            .tables
            .write()
            .remove(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        info!(table = name, "Dropped table");
        Ok(table)
    }

    pub fn table(&self, name: &str) -> Result<Arc<TableHandle>> {
        self.tables
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.read().contains_key(name)
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn register_table(&self, table: Arc<TableHandle>) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.contains_key(table.name()) {
            return Err(Error::TableExists(table.name().to_string()));
        }
        tables.insert(table.name().to_string(), table);
        Ok(())
    }

    /// Unregisters `table` only if that exact handle is still the one under
    /// its name.
    pub(crate) fn unregister_table_if_same(&self, table: &Arc<TableHandle>) -> bool {
        let mut tables = self.tables.write();
        match tables.get(table.name()) {
            Some(current) if Arc::ptr_eq(current, table) => {
                tables.remove(table.name());
                true
            }
            _ => false,
        }
    }

    pub(crate) fn next_transaction_id(&self) -> TransactionId {
        self.next_transaction_id.fetch_add(1, Ordering::Relaxed)
    }
}
