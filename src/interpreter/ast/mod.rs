use crate::db::table::core::column::ColumnDefinition;
use crate::db::table::core::value::Value;
use crate::interpreter::tokenizer::{scanner::Token, token::TokenTypes};

mod create_statement;
mod delete_statement;
mod drop_statement;
mod helpers;
mod insert_statement;
pub mod parser;
mod select_statement;
pub mod statement_builder;
#[cfg(test)]
mod test_utils;
mod transaction_statements;
mod update_statement;

#[derive(Debug, PartialEq)]
pub struct DatabaseSqlStatement {
    pub sql_statement: SqlStatement,
    /// Number of `?` markers in the statement, numbered from 0 in text order.
    pub placeholder_count: usize,
    pub line_num: usize,
    pub statement_text: String,
}

#[derive(Debug, PartialEq, Clone)]
pub enum SqlStatement {
    CreateTable(CreateTableStatement),
    DropTable(DropTableStatement),
    InsertInto(InsertIntoStatement),
    Select(SelectStatement),
    UpdateStatement(UpdateStatement),
    DeleteStatement(DeleteStatement),
    BeginTransaction,
    Commit,
    Rollback,
}

impl SqlStatement {
    pub fn is_query(&self) -> bool {
        matches!(self, SqlStatement::Select(_))
    }

    pub fn is_schema_change(&self) -> bool {
        matches!(self, SqlStatement::CreateTable(_) | SqlStatement::DropTable(_))
    }

    pub fn table_name(&self) -> Option<&str> {
        match self {
            SqlStatement::CreateTable(statement) => Some(&statement.table_name),
            SqlStatement::DropTable(statement) => Some(&statement.table_name),
            SqlStatement::InsertInto(statement) => Some(&statement.table_name),
            SqlStatement::Select(statement) => Some(&statement.table_name),
            SqlStatement::UpdateStatement(statement) => Some(&statement.table_name),
            SqlStatement::DeleteStatement(statement) => Some(&statement.table_name),
            SqlStatement::BeginTransaction | SqlStatement::Commit | SqlStatement::Rollback => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct CreateTableStatement {
    pub table_name: String,
    pub existence_check: Option<ExistenceCheck>,
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DropTableStatement {
    pub table_name: String,
    pub existence_check: Option<ExistenceCheck>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExistenceCheck {
    IfNotExists,
    IfExists,
}

/// A value position in a statement: either written inline or left as a `?`
/// to be filled at bind time.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Value(Value),
    Placeholder(usize),
}

#[derive(Debug, PartialEq, Clone)]
pub struct InsertIntoStatement {
    pub table_name: String,
    pub columns: Option<Vec<String>>,
    pub values: Vec<Vec<Expr>>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum SelectColumns {
    All,
    Columns(Vec<String>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct SelectStatement {
    pub table_name: String,
    pub columns: SelectColumns,
    pub where_clause: Option<Vec<WhereStackElement>>,
    pub order_by_clause: Option<OrderByClause>,
    pub limit_clause: Option<LimitClause>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DeleteStatement {
    pub table_name: String,
    pub where_clause: Option<Vec<WhereStackElement>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct UpdateStatement {
    pub table_name: String,
    pub update_values: Vec<ColumnValue>,
    pub where_clause: Option<Vec<WhereStackElement>>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ColumnValue {
    pub column: String,
    pub value: Expr,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessEquals,
    GreaterEquals,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// The operator that keeps the meaning when both sides swap places.
    pub fn mirrored(self) -> Operator {
        match self {
            Operator::LessThan => Operator::GreaterThan,
            Operator::GreaterThan => Operator::LessThan,
            Operator::LessEquals => Operator::GreaterEquals,
            Operator::GreaterEquals => Operator::LessEquals,
            other => other,
        }
    }
}

/// `column operator value`. Conditions written as `value operator column`
/// are stored mirrored so the column is always on the left.
#[derive(Debug, PartialEq, Clone)]
pub struct WhereCondition {
    pub column: String,
    pub operator: Operator,
    pub value: Expr,
}

#[derive(Debug, PartialEq, Clone)]
pub enum WhereStackElement {
    Condition(WhereCondition),
    LogicalOperator(LogicalOperator),
    Parentheses(Parentheses),
}

#[derive(Debug, PartialEq, Clone)]
pub enum WhereStackOperators {
    LogicalOperator(LogicalOperator),
    Parentheses(Parentheses),
}

impl WhereStackOperators {
    pub fn into_where_stack_element(self) -> WhereStackElement {
        match self {
            WhereStackOperators::LogicalOperator(logical_operator) => WhereStackElement::LogicalOperator(logical_operator),
            WhereStackOperators::Parentheses(parentheses) => WhereStackElement::Parentheses(parentheses),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LogicalOperator {
    Not,
    And,
    Or,
}

impl LogicalOperator {
    pub fn is_greater_precedence(&self, other: &LogicalOperator) -> bool {
        match (self, other) {
            (LogicalOperator::Not, LogicalOperator::Not) => false,
            (LogicalOperator::Not, _) => true,
            (LogicalOperator::And, LogicalOperator::Or) => true,
            (LogicalOperator::And, _) => false,
            (LogicalOperator::Or, _) => false,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Parentheses {
    Left,
    Right,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

#[derive(Debug, PartialEq, Clone)]
pub struct OrderByClause {
    pub columns: Vec<String>,
    pub directions: Vec<OrderByDirection>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct LimitClause {
    pub limit: usize,
    pub offset: Option<usize>,
}

pub fn generate(tokens: Vec<Token>) -> Vec<Result<DatabaseSqlStatement, String>> {
    let mut results: Vec<Result<DatabaseSqlStatement, String>> = vec![];
    let mut parser = parser::Parser::new(tokens);
    loop {
        let line_num = match parser.line_num() {
            Ok(line_num) => line_num,
            Err(err) => {
                results.push(Err(err));
                break;
            }
        };
        let Some(next_statement) = parser.next_statement() else {
            break;
        };
        match next_statement {
            Err(error) => {
                results.push(Err(error));
                // Skip the rest of the broken statement.
                loop {
                    match parser.current_token() {
                        Ok(token) if token.token_type == TokenTypes::EOF => break,
                        Ok(token) if token.token_type == TokenTypes::SemiColon => {
                            let _ = parser.advance_past_semicolon();
                            break;
                        }
                        Ok(_) => {
                            if parser.advance().is_err() {
                                return results;
                            }
                        }
                        Err(_) => break,
                    }
                }
            }
            Ok(sql_statement) => {
                if let Err(error) = parser.advance_past_semicolon() {
                    results.push(Err(error));
                    return results;
                }
                results.push(Ok(DatabaseSqlStatement {
                    sql_statement,
                    placeholder_count: parser.placeholder_count(),
                    line_num,
                    statement_text: parser.get_sql_statement_text(),
                }));
            }
        }
    }
    return results;
}
