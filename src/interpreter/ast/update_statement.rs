use crate::interpreter::ast::helpers::where_clause::get_where_clause;
use crate::interpreter::ast::{
    ColumnValue, SqlStatement, UpdateStatement,
    helpers::common::get_table_name,
    helpers::token::{expect_statement_end, expect_token_type, token_to_expr},
    parser::Parser,
};
use crate::interpreter::tokenizer::token::TokenTypes;

pub fn build(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    let table_name = get_table_name(parser)?;
    expect_token_type(parser, TokenTypes::Set)?;
    let update_values = get_update_values(parser)?;
    let where_clause = get_where_clause(parser)?;

    expect_statement_end(parser)?;
    Ok(SqlStatement::UpdateStatement(UpdateStatement {
        table_name,
        update_values,
        where_clause,
    }))
}

// Only `column = value` assignments, no expressions over other columns.
fn get_update_values(parser: &mut Parser) -> Result<Vec<ColumnValue>, String> {
    parser.advance()?;
    let mut update_values = vec![];
    loop {
        let token = parser.current_token()?;
        expect_token_type(parser, TokenTypes::Identifier)?;
        let column = token.value.to_string();
        parser.advance()?;

        expect_token_type(parser, TokenTypes::Equals)?;
        parser.advance()?;

        let value = token_to_expr(parser)?;
        update_values.push(ColumnValue { column, value });
        parser.advance()?;

        if parser.current_token()?.token_type != TokenTypes::Comma {
            break;
        }
        parser.advance()?;
    }
    return Ok(update_values);
}
