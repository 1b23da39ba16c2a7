use crate::db::table::core::column::ColumnDefinition;
use crate::interpreter::{
    ast::{
        CreateTableStatement, ExistenceCheck,
        SqlStatement::{self, CreateTable},
        helpers::common::{exists_clause, get_table_name},
        helpers::token::{expect_statement_end, expect_token_type, token_to_data_type, token_to_value},
        parser::Parser,
    },
    tokenizer::token::TokenTypes,
};

pub fn build(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    expect_token_type(parser, TokenTypes::Table)?;
    let statement = table_statement(parser)?;
    expect_statement_end(parser)?;
    return Ok(statement);
}

fn table_statement(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    let existence_check = exists_clause(parser, ExistenceCheck::IfNotExists)?;
    let table_name = get_table_name(parser)?;
    let columns = column_definitions(parser)?;
    Ok(CreateTable(CreateTableStatement {
        table_name,
        existence_check,
        columns,
    }))
}

fn column_definitions(parser: &mut Parser) -> Result<Vec<ColumnDefinition>, String> {
    let mut columns: Vec<ColumnDefinition> = vec![];

    expect_token_type(parser, TokenTypes::LeftParen)?;
    parser.advance()?;

    loop {
        let token = parser.current_token()?;
        expect_token_type(parser, TokenTypes::Identifier)?;
        let column_name = token.value.to_string();
        parser.advance()?;

        let data_type = token_to_data_type(parser)?;
        let column = column_constraints(parser, ColumnDefinition::new(column_name, data_type))?;
        columns.push(column);

        match parser.current_token()?.token_type {
            TokenTypes::Comma => parser.advance()?,
            TokenTypes::RightParen => {
                parser.advance()?;
                break;
            }
            _ => return Err(parser.format_error()),
        }
    }
    return Ok(columns);
}

// PRIMARY KEY, NOT NULL, NULL, AUTOINCREMENT and DEFAULT, in any order.
fn column_constraints(parser: &mut Parser, mut column: ColumnDefinition) -> Result<ColumnDefinition, String> {
    loop {
        match parser.current_token()?.token_type {
            TokenTypes::Primary => {
                parser.advance()?;
                expect_token_type(parser, TokenTypes::Key)?;
                column = column.primary_key();
            }
            TokenTypes::Not => {
                parser.advance()?;
                expect_token_type(parser, TokenTypes::Null)?;
                column = column.not_null();
            }
            TokenTypes::Null => {}
            TokenTypes::AutoIncrement => {
                column = column.auto_increment();
            }
            TokenTypes::Default => {
                parser.advance()?;
                column = match parser.current_token()?.token_type {
                    TokenTypes::CurrentTimestamp => column.default_current_timestamp(),
                    _ => column.default_value(token_to_value(parser)?),
                };
            }
            _ => return Ok(column),
        }
        parser.advance()?;
    }
}
