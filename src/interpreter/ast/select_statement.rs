use crate::interpreter::ast::{
    SelectColumns, SelectStatement, SqlStatement,
    helpers::common::{get_table_name, tokens_to_identifier_list},
    helpers::limit_clause::get_limit,
    helpers::order_by_clause::get_order_by,
    helpers::token::{expect_statement_end, expect_token_type},
    helpers::where_clause::get_where_clause,
    parser::Parser,
};
use crate::interpreter::tokenizer::token::TokenTypes;

pub fn build(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    let columns = get_columns(parser)?;

    expect_token_type(parser, TokenTypes::From)?;
    parser.advance()?;
    let table_name = get_table_name(parser)?;
    let where_clause = get_where_clause(parser)?;
    let order_by_clause = get_order_by(parser)?;
    let limit_clause = get_limit(parser)?;

    expect_statement_end(parser)?;
    Ok(SqlStatement::Select(SelectStatement {
        table_name,
        columns,
        where_clause,
        order_by_clause,
        limit_clause,
    }))
}

fn get_columns(parser: &mut Parser) -> Result<SelectColumns, String> {
    if parser.current_token()?.token_type == TokenTypes::Asterisk {
        parser.advance()?;
        return Ok(SelectColumns::All);
    }
    return Ok(SelectColumns::Columns(tokens_to_identifier_list(parser)?));
}
