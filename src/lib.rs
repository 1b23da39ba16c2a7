//! An embedded, in-memory SQL engine: typed tables with a primary key
//! index, prepared statements with checked parameter binding, and
//! per-session transactions undone through an undo log.

pub mod binder;
pub mod config;
pub mod db;
pub mod error;
pub mod interpreter;

pub use binder::{BoundStatement, PreparedStatement};
pub use config::EngineConfig;
pub use db::database::Database;
pub use db::results::{ExecuteResult, ResultSet, StatementOutcome};
pub use db::session::Session;
pub use db::table::core::column::ColumnDefinition;
pub use db::table::core::row::{FromValue, Row};
pub use db::table::core::schema::TableSchema;
pub use db::table::core::value::{DataType, Value};
pub use db::transactions::{TransactionId, TransactionState};
pub use error::{Error, Result};

/// Builds an argument list for [`PreparedStatement::bind`] from values of
/// mixed types.
///
/// ```
/// let args = mollysql::params!["joko", 1000, None::<String>];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}
