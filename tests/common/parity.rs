use std::sync::Arc;

use mollysql::db::table::core::value::parse_timestamp;
use mollysql::interpreter::ast::SqlStatement;
use mollysql::{Database, EngineConfig, Row, Session, Value};
use rusqlite::Connection;
use rusqlite::types::{Value as SqliteValue, ValueRef};

/// Runs the same statements with the same arguments against mollysql and an
/// in-memory SQLite database and compares what comes back.
pub struct ParityManager {
    _database: Arc<Database>,
    session: Session,
    sqlite_conn: Connection,
}

impl ParityManager {
    pub fn new() -> Self {
        let database = Database::open(EngineConfig::default());
        let session = database.open_session();
        let sqlite_conn =
            Connection::open_in_memory().expect("Failed to create in-memory SQLite DB");
        Self {
            _database: database,
            session,
            sqlite_conn,
        }
    }

    /// Applies a script to both sides without comparing, for schema and seed data.
    pub fn setup(&mut self, sql: &str) {
        for result in self.session.run_sql(sql) {
            result.expect("mollysql setup failed");
        }
        self.sqlite_conn
            .execute_batch(sql)
            .expect("SQLite setup failed");
    }

    // One statement per call; `args` fill its placeholders on both sides.
    pub fn assert_parity(&mut self, sql: &str, args: &[Value]) {
        let molly_result = self
            .session
            .prepare(sql)
            .and_then(|prepared| prepared.bind(args.iter()))
            .and_then(|bound| self.session.query(&bound).map(|result| (bound, result)));
        let molly_result = match molly_result {
            Ok((bound, result)) => match bound.statement() {
                SqlStatement::Select(_) => Ok(Some(result.rows)),
                _ => Ok(None),
            },
            Err(e) => Err(e.to_string()),
        };

        let sqlite_args: Vec<SqliteValue> = args.iter().map(molly_val_to_sqlite_val).collect();
        let sqlite_result = match self.sqlite_conn.prepare(sql) {
            Ok(mut stmt) => {
                if stmt.column_count() > 0 {
                    let column_count = stmt.column_count();
                    let mut rows = stmt
                        .query(rusqlite::params_from_iter(sqlite_args.iter()))
                        .expect("SQLite query failed");
                    let mut result_rows = Vec::new();
                    while let Some(row) = rows.next().expect("SQLite next failed") {
                        let mut row_values = Vec::new();
                        for i in 0..column_count {
                            let val_ref = row.get_ref(i).unwrap();
                            row_values.push(sqlite_val_to_molly_val(val_ref));
                        }
                        result_rows.push(Row(row_values));
                    }
                    Ok(Some(result_rows))
                } else {
                    match stmt.execute(rusqlite::params_from_iter(sqlite_args.iter())) {
                        Ok(_) => Ok(None),
                        Err(e) => Err(e.to_string()),
                    }
                }
            }
            Err(e) => Err(e.to_string()),
        };

        match (molly_result, sqlite_result) {
            (Ok(Some(m_rows)), Ok(Some(s_rows))) => assert_rows_equal(s_rows, m_rows),
            (Ok(None), Ok(None)) => {}
            (Err(_), Err(_)) => {}
            (Ok(None), Ok(Some(_))) => panic!("Molly returned no rows, SQLite returned rows"),
            (Ok(Some(_)), Ok(None)) => panic!("Molly returned rows, SQLite returned no rows"),
            (Ok(_), Err(e)) => panic!("Molly succeeded, SQLite failed: {}", e),
            (Err(e), Ok(_)) => panic!("Molly failed: {}, SQLite succeeded", e),
        }
    }

    pub fn session(&mut self) -> &mut Session {
        &mut self.session
    }
}

fn assert_rows_equal(expected: Vec<Row>, actual: Vec<Row>) {
    assert_eq!(expected.len(), actual.len(), "Row count mismatch");
    for (i, (exp_row, act_row)) in expected.iter().zip(actual.iter()).enumerate() {
        assert_eq!(
            exp_row.0.len(),
            act_row.0.len(),
            "Column count mismatch at row {}",
            i
        );
        for (j, (exp_val, act_val)) in exp_row.0.iter().zip(act_row.0.iter()).enumerate() {
            if !values_equal_approx(exp_val, act_val) {
                panic!(
                    "Value mismatch at row {}, col {}: expected {:?}, got {:?}",
                    i, j, exp_val, act_val
                );
            }
        }
    }
}

fn values_equal_approx(v1: &Value, v2: &Value) -> bool {
    match (v1, v2) {
        (Value::Float(f1), Value::Float(f2)) => (f1 - f2).abs() < 1e-9,
        (Value::Integer(i1), Value::Integer(i2)) => i1 == i2,
        (Value::Text(t1), Value::Text(t2)) => t1 == t2,
        (Value::Null, Value::Null) => true,
        // SQLite keeps 1.0 as an integer and booleans as 0/1.
        (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
            (*i as f64 - f).abs() < 1e-9
        }
        (Value::Integer(i), Value::Boolean(b)) | (Value::Boolean(b), Value::Integer(i)) => {
            *i == *b as i64
        }
        (Value::Text(t), Value::Timestamp(ts)) | (Value::Timestamp(ts), Value::Text(t)) => {
            parse_timestamp(t) == Some(*ts)
        }
        _ => false,
    }
}

fn sqlite_val_to_molly_val(val: ValueRef) -> Value {
    match val {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).to_string()),
        ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).to_string()),
    }
}

fn molly_val_to_sqlite_val(val: &Value) -> SqliteValue {
    match val {
        Value::Null => SqliteValue::Null,
        Value::Integer(i) => SqliteValue::Integer(*i),
        Value::Float(f) => SqliteValue::Real(*f),
        Value::Text(t) => SqliteValue::Text(t.clone()),
        Value::Boolean(b) => SqliteValue::Integer(*b as i64),
        Value::Timestamp(ts) => SqliteValue::Text(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}
