use std::sync::Arc;

use crate::config::EngineConfig;
use crate::db::database::Database;
use crate::db::table::TableHandle;
use crate::db::table::core::column::ColumnDefinition;
use crate::db::table::core::row::Row;
use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::value::{DataType, Value};

pub fn customer_schema() -> TableSchema {
    TableSchema::new(
        "customer",
        vec![
            ColumnDefinition::new("id", DataType::Integer)
                .primary_key()
                .auto_increment(),
            ColumnDefinition::new("name", DataType::Text).not_null(),
            ColumnDefinition::new("balance", DataType::Integer)
                .not_null()
                .default_value(0),
        ],
    )
    .unwrap()
}

pub fn customer_handle() -> Arc<TableHandle> {
    Arc::new(TableHandle::new(customer_schema()))
}

pub fn customer_row(id: i64, name: &str, balance: i64) -> Row {
    Row(vec![
        Value::Integer(id),
        Value::Text(name.to_string()),
        Value::Integer(balance),
    ])
}

/// A database holding `customer` with ids 1..=4, one of them broke.
pub fn default_database() -> Arc<Database> {
    let database = Database::open(EngineConfig::default());
    database.create_table(customer_schema()).unwrap();
    let mut session = database.open_session();
    session
        .execute_sql(
            "INSERT INTO customer (name, balance) VALUES \
             ('Andi', 100), ('Budi', 250), ('Citra', 0), ('Dewi', 75)",
            crate::params![],
        )
        .unwrap();
    database
}
