use crate::interpreter::ast::helpers::token::expect_statement_end;
use crate::interpreter::ast::{SqlStatement, parser::Parser};
use crate::interpreter::tokenizer::token::TokenTypes;

// BEGIN, COMMIT, END and ROLLBACK each take an optional TRANSACTION keyword.
fn optional_transaction_keyword(parser: &mut Parser) -> Result<(), String> {
    parser.advance()?;
    if parser.current_token()?.token_type == TokenTypes::Transaction {
        parser.advance()?;
    }
    return expect_statement_end(parser);
}

pub fn build_begin(parser: &mut Parser) -> Result<SqlStatement, String> {
    optional_transaction_keyword(parser)?;
    return Ok(SqlStatement::BeginTransaction);
}

pub fn build_commit(parser: &mut Parser) -> Result<SqlStatement, String> {
    optional_transaction_keyword(parser)?;
    return Ok(SqlStatement::Commit);
}

pub fn build_rollback(parser: &mut Parser) -> Result<SqlStatement, String> {
    optional_transaction_keyword(parser)?;
    return Ok(SqlStatement::Rollback);
}
