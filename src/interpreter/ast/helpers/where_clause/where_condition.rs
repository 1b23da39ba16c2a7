use crate::db::table::core::value::Value;
use crate::interpreter::ast::helpers::token::{expect_token_type, token_to_expr};
use crate::interpreter::ast::{Expr, Operator, WhereCondition, parser::Parser};
use crate::interpreter::tokenizer::token::TokenTypes;

pub fn get_condition(parser: &mut Parser) -> Result<WhereCondition, String> {
    let token = parser.current_token()?;
    if token.token_type == TokenTypes::Identifier {
        let column = token.value.to_string();
        parser.advance()?;

        if parser.current_token()?.token_type == TokenTypes::Is {
            return get_null_check(parser, column);
        }

        let operator = get_operator(parser)?;
        parser.advance()?;
        let value = token_to_expr(parser)?;
        parser.advance()?;
        return Ok(WhereCondition { column, operator, value });
    }

    // `value operator column`
    let value = token_to_expr(parser)?;
    parser.advance()?;
    let operator = get_operator(parser)?;
    parser.advance()?;
    let token = parser.current_token()?;
    expect_token_type(parser, TokenTypes::Identifier)?;
    let column = token.value.to_string();
    parser.advance()?;
    Ok(WhereCondition {
        column,
        operator: operator.mirrored(),
        value,
    })
}

fn get_null_check(parser: &mut Parser, column: String) -> Result<WhereCondition, String> {
    parser.advance()?;
    let operator = if parser.current_token()?.token_type == TokenTypes::Not {
        parser.advance()?;
        Operator::IsNotNull
    } else {
        Operator::IsNull
    };
    expect_token_type(parser, TokenTypes::Null)?;
    parser.advance()?;
    Ok(WhereCondition {
        column,
        operator,
        value: Expr::Value(Value::Null),
    })
}

fn get_operator(parser: &Parser) -> Result<Operator, String> {
    match parser.current_token()?.token_type {
        TokenTypes::Equals => Ok(Operator::Equals),
        TokenTypes::NotEquals => Ok(Operator::NotEquals),
        TokenTypes::LessThan => Ok(Operator::LessThan),
        TokenTypes::LessEquals => Ok(Operator::LessEquals),
        TokenTypes::GreaterThan => Ok(Operator::GreaterThan),
        TokenTypes::GreaterEquals => Ok(Operator::GreaterEquals),
        _ => Err(parser.format_error()),
    }
}
