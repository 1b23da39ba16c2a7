use crate::interpreter::{
    ast::{
        Expr, InsertIntoStatement,
        SqlStatement::{self, InsertInto},
        helpers::common::{get_table_name, tokens_to_identifier_list},
        helpers::token::{expect_statement_end, expect_token_type, token_to_expr},
        parser::Parser,
    },
    tokenizer::token::TokenTypes,
};

pub fn build(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    expect_token_type(parser, TokenTypes::Into)?;
    let statement = into_statement(parser)?;
    expect_statement_end(parser)?;
    return Ok(statement);
}

fn into_statement(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    let table_name = get_table_name(parser)?;

    let columns = match parser.current_token()?.token_type {
        TokenTypes::LeftParen => Some(get_columns(parser)?),
        TokenTypes::Values => None,
        _ => return Err(parser.format_error()),
    };

    expect_token_type(parser, TokenTypes::Values)?;
    parser.advance()?;
    let mut values = vec![];
    loop {
        values.push(get_values(parser)?);
        if parser.current_token()?.token_type != TokenTypes::Comma {
            break;
        }
        parser.advance()?;
    }

    let statement = InsertIntoStatement {
        table_name,
        columns,
        values,
    };
    validate_insert_statement(&statement)?;
    return Ok(InsertInto(statement));
}

fn validate_insert_statement(statement: &InsertIntoStatement) -> Result<(), String> {
    let width = statement.values[0].len();
    if statement.values.iter().any(|row| row.len() != width) {
        return Err("Rows have different lengths".to_string());
    }
    if let Some(columns) = &statement.columns {
        if columns.len() != width {
            return Err("Columns and values have different lengths".to_string());
        }
    }
    return Ok(());
}

fn get_values(parser: &mut Parser) -> Result<Vec<Expr>, String> {
    expect_token_type(parser, TokenTypes::LeftParen)?;
    parser.advance()?;
    let mut values: Vec<Expr> = vec![];
    loop {
        values.push(token_to_expr(parser)?);
        parser.advance()?;

        match parser.current_token()?.token_type {
            TokenTypes::Comma => parser.advance()?,
            TokenTypes::RightParen => {
                parser.advance()?;
                return Ok(values);
            }
            _ => return Err(parser.format_error()),
        }
    }
}

fn get_columns(parser: &mut Parser) -> Result<Vec<String>, String> {
    parser.advance()?;
    let columns = tokens_to_identifier_list(parser)?;
    expect_token_type(parser, TokenTypes::RightParen)?;
    parser.advance()?;
    return Ok(columns);
}
