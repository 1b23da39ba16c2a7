use std::sync::Arc;

use tracing::info;

use crate::db::table::TableHandle;
use crate::db::table::core::row::{Row, RowId};
use crate::db::table::core::table::RowPosition;
use crate::error::{Error, Result};

pub mod rollback;

pub type TransactionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    Active,
    Committed,
    RolledBack,
}

/// The inverse of one applied mutation.
#[derive(Debug)]
pub enum UndoEntry {
    /// Undone by deleting the row.
    Insert { table: Arc<TableHandle>, row_id: RowId },
    /// Undone by restoring the row at the position it left.
    Delete {
        table: Arc<TableHandle>,
        row_id: RowId,
        position: RowPosition,
        row: Row,
    },
    /// Undone by writing the previous image back. `row_id` is the key the row
    /// has now, `previous_id` the key it had before.
    Update {
        table: Arc<TableHandle>,
        row_id: RowId,
        previous_id: RowId,
        previous: Row,
    },
    /// Undone by dropping the table again.
    CreateTable { table: Arc<TableHandle> },
    /// Undone by re-registering the dropped table with its rows.
    DropTable { table: Arc<TableHandle> },
}

impl UndoEntry {
    pub fn table(&self) -> &Arc<TableHandle> {
        match self {
            UndoEntry::Insert { table, .. }
            | UndoEntry::Delete { table, .. }
            | UndoEntry::Update { table, .. }
            | UndoEntry::CreateTable { table }
            | UndoEntry::DropTable { table } => table,
        }
    }
}

/// Per-session transaction state and undo log.
#[derive(Debug)]
pub struct TransactionLog {
    state: TransactionState,
    id: Option<TransactionId>,
    entries: Vec<UndoEntry>,
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            state: TransactionState::Idle,
            id: None,
            entries: vec![],
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn id(&self) -> Option<TransactionId> {
        self.id
    }

    pub fn in_transaction(&self) -> bool {
        self.state == TransactionState::Active
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn begin_transaction(&mut self, id: TransactionId) -> Result<()> {
        if self.in_transaction() {
            return Err(Error::AlreadyActive);
        }
        self.state = TransactionState::Active;
        self.id = Some(id);
        self.entries.clear();
        info!(transaction = id, "Transaction started");
        Ok(())
    }

    /// Appends undo entries while a transaction is active. Outside one the
    /// statement has already autocommitted and the entries are dropped.
    pub fn append_entries(&mut self, entries: Vec<UndoEntry>) {
        if self.in_transaction() {
            self.entries.extend(entries);
        }
    }

    /// Discards the log. Returns the number of entries that were held.
    pub fn commit_transaction(&mut self) -> Result<usize> {
        if !self.in_transaction() {
            return Err(Error::NoActiveTransaction);
        }
        let discarded = self.entries.len();
        self.entries.clear();
        self.state = TransactionState::Committed;
        info!(transaction = ?self.id, entries = discarded, "Transaction committed");
        Ok(discarded)
    }

    /// Hands the log over for replay and marks the transaction rolled back.
    pub fn take_for_rollback(&mut self) -> Result<Vec<UndoEntry>> {
        if !self.in_transaction() {
            return Err(Error::NoActiveTransaction);
        }
        self.state = TransactionState::RolledBack;
        info!(transaction = ?self.id, entries = self.entries.len(), "Transaction rolling back");
        Ok(std::mem::take(&mut self.entries))
    }
}
