use crate::interpreter::{
    ast::{
        DropTableStatement, ExistenceCheck, SqlStatement,
        helpers::common::{exists_clause, get_table_name},
        helpers::token::{expect_statement_end, expect_token_type},
        parser::Parser,
    },
    tokenizer::token::TokenTypes,
};

pub fn build(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    expect_token_type(parser, TokenTypes::Table)?;
    parser.advance()?;

    let existence_check = exists_clause(parser, ExistenceCheck::IfExists)?;
    let table_name = get_table_name(parser)?;
    expect_statement_end(parser)?;
    Ok(SqlStatement::DropTable(DropTableStatement {
        table_name,
        existence_check,
    }))
}
