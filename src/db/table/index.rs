use std::collections::HashMap;

use crate::db::table::core::row::RowId;
use crate::db::table::core::table::RowPosition;
use crate::error::{Error, Result};

/// Hash index from primary key to the row's position in the table.
#[derive(Debug)]
pub struct PrimaryKeyIndex {
    table_name: String,
    entries: HashMap<RowId, RowPosition>,
}

impl PrimaryKeyIndex {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            entries: HashMap::new(),
        }
    }

    pub fn lookup(&self, key: &RowId) -> Option<RowPosition> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &RowId) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: RowId, position: RowPosition) -> Result<()> {
        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateKey {
                table: self.table_name.clone(),
                key: key.to_string(),
            });
        }
        self.entries.insert(key, position);
        Ok(())
    }

    /// Removes `key`, failing with `NotFound` when it is absent. Callers that
    /// need to tell "never existed" from "already removed" check `contains`.
    pub fn remove(&mut self, key: &RowId) -> Result<RowPosition> {
        self.entries.remove(key).ok_or_else(|| Error::NotFound {
            table: self.table_name.clone(),
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
