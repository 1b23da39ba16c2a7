//! Error types for the engine.

use std::io;

use thiserror::Error;

use crate::db::table::core::value::DataType;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the engine. Nothing is retried or swallowed internally,
/// every failure reaches the immediate caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A row with the same primary key already exists.
    #[error("Duplicate key {key} in table `{table}`")]
    DuplicateKey { table: String, key: String },

    /// No row with the given primary key exists.
    #[error("Row with key {key} not found in table `{table}`")]
    NotFound { table: String, key: String },

    /// The number of supplied arguments differs from the placeholder count.
    #[error("Statement expects {expected} argument(s) but {actual} were supplied")]
    ArityMismatch { expected: usize, actual: usize },

    /// A value does not satisfy the declared column type.
    #[error("Type mismatch for column `{column}`: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        found: String,
    },

    #[error("A transaction is already active in this session")]
    AlreadyActive,

    #[error("No transaction is currently active")]
    NoActiveTransaction,

    /// The SQL text could not be tokenized or parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Table `{0}` does not exist")]
    TableNotFound(String),

    #[error("Table `{0}` already exists")]
    TableExists(String),

    #[error("Column `{column}` does not exist in table `{table}`")]
    ColumnNotFound { table: String, column: String },

    #[error("NOT NULL constraint failed: {table}.{column}")]
    NotNull { table: String, column: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn type_mismatch(column: &str, expected: DataType, found: impl ToString) -> Self {
        Error::TypeMismatch {
            column: column.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
