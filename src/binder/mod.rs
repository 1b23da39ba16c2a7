//! Prepared statements and parameter binding.
//!
//! A template is parsed once. Each `?` becomes a [`Slot`] tied to the column
//! it fills or is compared against, and [`PreparedStatement::bind`] checks
//! arguments against those slots. Arguments travel next to the statement
//! tree as values; they are never spliced into SQL text.

use std::sync::Arc;

use crate::db::database::Database;
use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::value::Value;
use crate::db::table::operations::helpers::common::{check_values_width, insert_target_columns};
use crate::error::{Error, Result};
use crate::interpreter::ast::{DatabaseSqlStatement, Expr, SqlStatement, WhereStackElement};
use crate::interpreter::parse_statement;

pub mod cache;
pub mod slot;

pub use slot::{Slot, SlotKind};

#[derive(Debug, Clone)]
pub struct PreparedStatement {
    sql: Arc<str>,
    statement: Arc<SqlStatement>,
    slots: Vec<Slot>,
    // Schema the slots were resolved against; only set when there are slots.
    schema: Option<Arc<TableSchema>>,
}

impl PreparedStatement {
    pub fn prepare(database: &Database, sql: &str) -> Result<Self> {
        let parsed = parse_statement(sql)?;
        Self::from_parsed(database, parsed)
    }

    pub(crate) fn from_parsed(database: &Database, parsed: DatabaseSqlStatement) -> Result<Self> {
        let DatabaseSqlStatement {
            sql_statement,
            placeholder_count,
            statement_text,
            ..
        } = parsed;

        let (slots, schema) = if placeholder_count == 0 {
            (vec![], None)
        } else {
            let table_name = sql_statement.table_name().ok_or_else(|| {
                Error::Parse("Placeholders are only allowed in statements on a table".to_string())
            })?;
            let schema = Arc::clone(database.table(table_name)?.schema());
            let slots = resolve_slots(&sql_statement, &schema, placeholder_count)?;
            (slots, Some(schema))
        };

        Ok(Self {
            sql: Arc::from(statement_text),
            statement: Arc::new(sql_statement),
            slots,
            schema,
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn statement(&self) -> &SqlStatement {
        &self.statement
    }

    pub fn placeholder_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Validates `args` against the slots, in placeholder order.
    pub fn bind<I, V>(&self, args: I) -> Result<BoundStatement>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        if args.len() != self.slots.len() {
            return Err(Error::ArityMismatch {
                expected: self.slots.len(),
                actual: args.len(),
            });
        }
        let params = self
            .slots
            .iter()
            .zip(args)
            .map(|(slot, value)| slot.admit(value))
            .collect::<Result<Vec<_>>>()?;
        Ok(BoundStatement {
            sql: Arc::clone(&self.sql),
            statement: Arc::clone(&self.statement),
            params,
        })
    }

    /// False once the table the slots were resolved against has been dropped
    /// or replaced.
    pub(crate) fn is_current(&self, database: &Database) -> bool {
        let Some(schema) = &self.schema else {
            return true;
        };
        database
            .table(schema.name())
            .is_ok_and(|table| Arc::ptr_eq(table.schema(), schema))
    }
}

/// A prepared statement together with validated arguments, ready to execute.
#[derive(Debug, Clone)]
pub struct BoundStatement {
    sql: Arc<str>,
    statement: Arc<SqlStatement>,
    params: Vec<Value>,
}

impl BoundStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn statement(&self) -> &SqlStatement {
        &self.statement
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

fn resolve_slots(statement: &SqlStatement, schema: &TableSchema, count: usize) -> Result<Vec<Slot>> {
    let mut slots: Vec<Option<Slot>> = vec![None; count];
    let mut fill = |expr: &Expr, column: usize, kind: SlotKind| {
        if let Expr::Placeholder(index) = expr {
            if let Some(slot) = slots.get_mut(*index) {
                *slot = Some(Slot::for_column(schema, *index, column, kind));
            }
        }
    };

    match statement {
        SqlStatement::InsertInto(insert) => {
            let targets = insert_target_columns(schema, &insert.columns)?;
            for values in &insert.values {
                check_values_width(schema, &targets, values)?;
                for (target, expr) in targets.iter().zip(values) {
                    fill(expr, *target, SlotKind::Insert);
                }
            }
        }
        SqlStatement::UpdateStatement(update) => {
            for update_value in &update.update_values {
                let column = schema.get_index_of_column(&update_value.column)?;
                fill(&update_value.value, column, SlotKind::Assign);
            }
            where_slots(schema, update.where_clause.as_deref(), &mut fill)?;
        }
        SqlStatement::Select(select) => {
            where_slots(schema, select.where_clause.as_deref(), &mut fill)?;
        }
        SqlStatement::DeleteStatement(delete) => {
            where_slots(schema, delete.where_clause.as_deref(), &mut fill)?;
        }
        _ => {}
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| {
                Error::Parse(format!("Placeholder {} is not tied to a column", index + 1))
            })
        })
        .collect()
}

fn where_slots<F>(
    schema: &TableSchema,
    where_clause: Option<&[WhereStackElement]>,
    fill: &mut F,
) -> Result<()>
where
    F: FnMut(&Expr, usize, SlotKind),
{
    for element in where_clause.unwrap_or_default() {
        if let WhereStackElement::Condition(condition) = element {
            let column = schema.get_index_of_column(&condition.column)?;
            fill(&condition.value, column, SlotKind::Where);
        }
    }
    Ok(())
}
