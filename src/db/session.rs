use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::binder::cache::StatementCache;
use crate::binder::{BoundStatement, PreparedStatement};
use crate::db::database::Database;
use crate::db::results::{ExecuteResult, ResultSet, StatementOutcome};
use crate::db::table::core::value::Value;
use crate::db::table::operations::{
    Applied, create_table, delete, drop_table, insert, select, update,
};
use crate::db::transactions::rollback::rollback_entries;
use crate::db::transactions::{TransactionId, TransactionLog, TransactionState};
use crate::error::{Error, Result};
use crate::interpreter::ast::SqlStatement;
use crate::interpreter::parse_script;

/// One caller's view of a [`Database`]: its own transaction and its own
/// prepared statement cache. Sessions are not shared between threads; open
/// one per thread on the same `Arc<Database>`.
#[derive(Debug)]
pub struct Session {
    database: Arc<Database>,
    transaction: TransactionLog,
    statements: StatementCache,
}

impl Session {
    pub(crate) fn new(database: Arc<Database>) -> Self {
        let statements = StatementCache::new(database.config().statement_cache_capacity);
        Self {
            database,
            transaction: TransactionLog::new(),
            statements,
        }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    pub fn transaction_state(&self) -> TransactionState {
        self.transaction.state()
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.in_transaction()
    }

    pub fn begin_transaction(&mut self) -> Result<TransactionId> {
        let id = self.database.next_transaction_id();
        self.transaction.begin_transaction(id)?;
        Ok(id)
    }

    pub fn commit(&mut self) -> Result<()> {
        self.transaction.commit_transaction()?;
        Ok(())
    }

    /// Undoes every mutation of the active transaction, newest first.
    /// Allocated keys stay used.
    pub fn rollback(&mut self) -> Result<()> {
        let entries = self.transaction.take_for_rollback()?;
        rollback_entries(&self.database, entries)
    }

    /// Parses `sql` once per session; later calls with the same text reuse
    /// the cached statement while its table is unchanged.
    pub fn prepare(&mut self, sql: &str) -> Result<PreparedStatement> {
        if let Some(prepared) = self.statements.get(sql) {
            if prepared.is_current(&self.database) {
                return Ok(prepared.clone());
            }
        }
        let prepared = PreparedStatement::prepare(&self.database, sql)?;
        self.statements.insert(sql, prepared.clone());
        Ok(prepared)
    }

    /// Runs a statement for its effect. A query run this way reports no rows
    /// affected.
    pub fn execute(&mut self, bound: &BoundStatement) -> Result<ExecuteResult> {
        match self.run(bound.statement(), bound.params(), bound.sql())? {
            StatementOutcome::Executed(result) => Ok(result),
            StatementOutcome::Query(_) => Ok(ExecuteResult::default()),
        }
    }

    /// Runs a statement for its rows. Anything other than SELECT still runs
    /// and yields an empty result.
    pub fn query(&mut self, bound: &BoundStatement) -> Result<ResultSet> {
        match self.run(bound.statement(), bound.params(), bound.sql())? {
            StatementOutcome::Query(result) => Ok(result),
            StatementOutcome::Executed(_) => Ok(ResultSet::default()),
        }
    }

    pub fn execute_sql<I, V>(&mut self, sql: &str, args: I) -> Result<ExecuteResult>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let bound = self.prepare(sql)?.bind(args)?;
        self.execute(&bound)
    }

    pub fn query_sql<I, V>(&mut self, sql: &str, args: I) -> Result<ResultSet>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let bound = self.prepare(sql)?.bind(args)?;
        self.query(&bound)
    }

    /// Runs a script of `;`-separated statements, one result per statement.
    /// A failing statement does not stop the ones after it.
    pub fn run_sql(&mut self, script: &str) -> Vec<Result<StatementOutcome>> {
        parse_script(script)
            .into_iter()
            .map(|parsed| {
                let parsed = parsed?;
                if parsed.placeholder_count > 0 {
                    return Err(Error::ArityMismatch {
                        expected: parsed.placeholder_count,
                        actual: 0,
                    });
                }
                self.run(&parsed.sql_statement, &[], &parsed.statement_text)
            })
            .collect()
    }

    fn run(&mut self, statement: &SqlStatement, params: &[Value], sql: &str) -> Result<StatementOutcome> {
        let config = self.database.config();
        if config.log_statements {
            debug!(sql, params = params.len(), "Executing statement");
        }
        let threshold = Duration::from_millis(config.slow_statement_threshold_ms);

        let started = Instant::now();
        let outcome = self.dispatch(statement, params);
        let elapsed = started.elapsed();
        if elapsed > threshold {
            warn!(sql, elapsed_ms = elapsed.as_millis() as u64, "Slow statement");
        }
        outcome
    }

    fn dispatch(&mut self, statement: &SqlStatement, params: &[Value]) -> Result<StatementOutcome> {
        let applied = match statement {
            SqlStatement::Select(statement) => {
                let table = self.database.table(&statement.table_name)?;
                let max_rows = self.database.config().max_result_rows;
                let result = select::select(&table, statement, params, max_rows)?;
                return Ok(StatementOutcome::Query(result));
            }
            SqlStatement::InsertInto(statement) => {
                insert::insert(&self.database.table(&statement.table_name)?, statement, params)?
            }
            SqlStatement::UpdateStatement(statement) => {
                update::update(&self.database.table(&statement.table_name)?, statement, params)?
            }
            SqlStatement::DeleteStatement(statement) => {
                delete::delete(&self.database.table(&statement.table_name)?, statement, params)?
            }
            SqlStatement::CreateTable(statement) => Applied {
                result: ExecuteResult::default(),
                undo: create_table::create_table(&self.database, statement)?
                    .into_iter()
                    .collect(),
            },
            SqlStatement::DropTable(statement) => Applied {
                result: ExecuteResult::default(),
                undo: drop_table::drop_table(&self.database, statement)?
                    .into_iter()
                    .collect(),
            },
            SqlStatement::BeginTransaction => {
                self.begin_transaction()?;
                return Ok(StatementOutcome::Executed(ExecuteResult::default()));
            }
            SqlStatement::Commit => {
                self.commit()?;
                return Ok(StatementOutcome::Executed(ExecuteResult::default()));
            }
            SqlStatement::Rollback => {
                self.rollback()?;
                return Ok(StatementOutcome::Executed(ExecuteResult::default()));
            }
        };
        self.transaction.append_entries(applied.undo);
        Ok(StatementOutcome::Executed(applied.result))
    }
}
