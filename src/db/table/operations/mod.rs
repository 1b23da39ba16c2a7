use crate::db::results::ExecuteResult;
use crate::db::transactions::UndoEntry;

pub mod create_table;
pub mod delete;
pub mod drop_table;
pub mod helpers;
pub mod insert;
pub mod select;
pub mod update;

/// A completed mutation and the undo entries that reverse it, oldest first.
#[derive(Debug)]
pub struct Applied {
    pub result: ExecuteResult,
    pub undo: Vec<UndoEntry>,
}
