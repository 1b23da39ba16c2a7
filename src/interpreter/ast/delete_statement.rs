use crate::interpreter::{
    ast::{
        DeleteStatement, SqlStatement,
        helpers::{
            common::get_table_name,
            token::{expect_statement_end, expect_token_type},
            where_clause::get_where_clause,
        },
        parser::Parser,
    },
    tokenizer::token::TokenTypes,
};

pub fn build(parser: &mut Parser) -> Result<SqlStatement, String> {
    parser.advance()?;
    expect_token_type(parser, TokenTypes::From)?;
    parser.advance()?;
    let table_name = get_table_name(parser)?;
    let where_clause = get_where_clause(parser)?;

    expect_statement_end(parser)?;
    Ok(SqlStatement::DeleteStatement(DeleteStatement {
        table_name,
        where_clause,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::core::value::Value;
    use crate::interpreter::ast::test_utils::token;
    use crate::interpreter::ast::{Expr, Operator, WhereCondition, WhereStackElement};

    #[test]
    fn delete_all_rows() {
        // DELETE FROM users;
        let tokens = vec![
            token(TokenTypes::Delete, "DELETE"),
            token(TokenTypes::From, "FROM"),
            token(TokenTypes::Identifier, "users"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let expected = SqlStatement::DeleteStatement(DeleteStatement {
            table_name: "users".to_string(),
            where_clause: None,
        });
        assert_eq!(Ok(expected), build(&mut parser));
    }

    #[test]
    fn delete_with_where_clause() {
        // DELETE FROM comments WHERE id < 5;
        let tokens = vec![
            token(TokenTypes::Delete, "DELETE"),
            token(TokenTypes::From, "FROM"),
            token(TokenTypes::Identifier, "comments"),
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Identifier, "id"),
            token(TokenTypes::LessThan, "<"),
            token(TokenTypes::IntLiteral, "5"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let expected = SqlStatement::DeleteStatement(DeleteStatement {
            table_name: "comments".to_string(),
            where_clause: Some(vec![WhereStackElement::Condition(WhereCondition {
                column: "id".to_string(),
                operator: Operator::LessThan,
                value: Expr::Value(Value::Integer(5)),
            })]),
        });
        assert_eq!(Ok(expected), build(&mut parser));
    }
}
