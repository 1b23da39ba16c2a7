//! SQL text to statement trees.

pub mod ast;
pub mod tokenizer;

use crate::error::{Error, Result};
use ast::DatabaseSqlStatement;

/// Parses every statement in `sql`. A statement that fails to parse yields an
/// error in its place and parsing resumes after the next `;`.
pub fn parse_script(sql: &str) -> Vec<Result<DatabaseSqlStatement>> {
    let tokens = tokenizer::tokenize(sql);
    ast::generate(tokens)
        .into_iter()
        .map(|statement| statement.map_err(Error::Parse))
        .collect()
}

/// Parses text that must hold exactly one statement.
pub fn parse_statement(sql: &str) -> Result<DatabaseSqlStatement> {
    let mut statements = parse_script(sql).into_iter();
    let statement = statements
        .next()
        .ok_or_else(|| Error::Parse("Empty statement".to_string()))??;
    if statements.next().is_some() {
        return Err(Error::Parse(
            "Expected a single statement but found more than one".to_string(),
        ));
    }
    Ok(statement)
}
