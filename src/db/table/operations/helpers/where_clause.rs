use std::cmp::Ordering;

use crate::db::table::core::row::Row;
use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::value::Value;
use crate::db::table::operations::helpers::common::resolve;
use crate::error::{Error, Result};
use crate::interpreter::ast::{LogicalOperator, Operator, WhereCondition, WhereStackElement};

/// A WHERE clause compiled against one table: column names resolved to
/// positions and placeholders replaced by their bound values.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Condition {
        column: usize,
        operator: Operator,
        value: Value,
    },
    Not(Box<Filter>),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
}

impl Filter {
    /// Builds the tree from the clause's reverse Polish form.
    pub fn compile(
        schema: &TableSchema,
        where_clause: &[WhereStackElement],
        params: &[Value],
    ) -> Result<Filter> {
        let mut stack: Vec<Filter> = vec![];
        for element in where_clause {
            match element {
                WhereStackElement::Condition(condition) => {
                    stack.push(compile_condition(schema, condition, params)?);
                }
                WhereStackElement::LogicalOperator(LogicalOperator::Not) => {
                    let operand = pop_operand(&mut stack)?;
                    stack.push(Filter::Not(Box::new(operand)));
                }
                WhereStackElement::LogicalOperator(operator) => {
                    let right = pop_operand(&mut stack)?;
                    let left = pop_operand(&mut stack)?;
                    stack.push(match operator {
                        LogicalOperator::And => Filter::And(Box::new(left), Box::new(right)),
                        _ => Filter::Or(Box::new(left), Box::new(right)),
                    });
                }
                WhereStackElement::Parentheses(_) => {
                    return Err(Error::Parse("Mismatched parentheses found.".to_string()));
                }
            }
        }
        let filter = pop_operand(&mut stack)?;
        if !stack.is_empty() {
            return Err(Error::Parse("Malformed WHERE clause".to_string()));
        }
        Ok(filter)
    }

    /// True only when the row definitely matches; unknown counts as no match.
    pub fn matches(&self, row: &Row) -> bool {
        self.evaluate(row) == Some(true)
    }

    // Three-valued: None is SQL's UNKNOWN.
    fn evaluate(&self, row: &Row) -> Option<bool> {
        match self {
            Filter::Condition {
                column,
                operator,
                value,
            } => evaluate_condition(&row[*column], *operator, value),
            Filter::Not(inner) => inner.evaluate(row).map(|result| !result),
            Filter::And(left, right) => match (left.evaluate(row), right.evaluate(row)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            Filter::Or(left, right) => match (left.evaluate(row), right.evaluate(row)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
        }
    }

    /// A primary key value every matching row must have, when the filter is
    /// a conjunction containing `pk = value`.
    pub fn point_key(&self, schema: &TableSchema) -> Option<Value> {
        let primary_key = schema.primary_key_index()?;
        self.point_key_at(primary_key, schema)
    }

    fn point_key_at(&self, primary_key: usize, schema: &TableSchema) -> Option<Value> {
        match self {
            Filter::Condition {
                column,
                operator: Operator::Equals,
                value,
            } if *column == primary_key
                && value.get_type() == Some(schema.column(primary_key).data_type) =>
            {
                Some(value.clone())
            }
            Filter::And(left, right) => left
                .point_key_at(primary_key, schema)
                .or_else(|| right.point_key_at(primary_key, schema)),
            _ => None,
        }
    }
}

fn pop_operand(stack: &mut Vec<Filter>) -> Result<Filter> {
    stack
        .pop()
        .ok_or_else(|| Error::Parse("Malformed WHERE clause".to_string()))
}

fn compile_condition(
    schema: &TableSchema,
    condition: &WhereCondition,
    params: &[Value],
) -> Result<Filter> {
    let column = schema.get_index_of_column(&condition.column)?;
    let value = resolve(&condition.value, params)?;
    // Compare in the column's type when the literal converts, otherwise as given.
    let value = value
        .coerce_to(schema.column(column).data_type)
        .unwrap_or(value);
    Ok(Filter::Condition {
        column,
        operator: condition.operator,
        value,
    })
}

fn evaluate_condition(stored: &Value, operator: Operator, value: &Value) -> Option<bool> {
    match operator {
        Operator::IsNull => return Some(stored.is_null()),
        Operator::IsNotNull => return Some(!stored.is_null()),
        _ => {}
    }
    let ordering = stored.compare(value)?;
    Some(match operator {
        Operator::Equals => ordering == Ordering::Equal,
        Operator::NotEquals => ordering != Ordering::Equal,
        Operator::LessThan => ordering == Ordering::Less,
        Operator::LessEquals => ordering != Ordering::Greater,
        Operator::GreaterThan => ordering == Ordering::Greater,
        Operator::GreaterEquals => ordering != Ordering::Less,
        Operator::IsNull | Operator::IsNotNull => unreachable!(),
    })
}
