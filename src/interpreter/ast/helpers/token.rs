use crate::db::table::core::value::{DataType, Value};
use crate::interpreter::ast::Expr;
use crate::interpreter::ast::parser::Parser;
use crate::interpreter::tokenizer::scanner::Token;
use crate::interpreter::tokenizer::token::TokenTypes;

// Returns an error if the current token does not match the given token type
pub fn expect_token_type(parser: &Parser, token_type: TokenTypes) -> Result<(), String> {
    let token = parser.current_token()?;
    if token.token_type != token_type {
        return Err(parser.format_error());
    }
    return Ok(());
}

// A statement ends at a semicolon or at the end of input.
pub fn expect_statement_end(parser: &Parser) -> Result<(), String> {
    match parser.current_token()?.token_type {
        TokenTypes::SemiColon | TokenTypes::EOF => Ok(()),
        _ => Err(parser.format_error()),
    }
}

pub fn token_to_value(parser: &Parser) -> Result<Value, String> {
    let token = parser.current_token()?;

    match token.token_type {
        TokenTypes::IntLiteral => {
            let num = token
                .value
                .parse::<i64>()
                .map_err(|_| parser.format_error())?;
            Ok(Value::Integer(num))
        }
        TokenTypes::RealLiteral => {
            let num = token
                .value
                .parse::<f64>()
                .map_err(|_| parser.format_error())?;
            Ok(Value::Float(num))
        }
        TokenTypes::String => Ok(Value::Text(token.value.replace("''", "'"))),
        TokenTypes::True => Ok(Value::Boolean(true)),
        TokenTypes::False => Ok(Value::Boolean(false)),
        TokenTypes::Null => Ok(Value::Null),
        _ => Err(parser.format_error()),
    }
}

// A literal, or a `?` that takes the next placeholder index.
pub fn token_to_expr(parser: &mut Parser) -> Result<Expr, String> {
    if parser.current_token()?.token_type == TokenTypes::Placeholder {
        return Ok(Expr::Placeholder(parser.next_placeholder()));
    }
    return Ok(Expr::Value(token_to_value(parser)?));
}

// Column types are plain identifiers, an optional `(n)` or `(p, s)` size is skipped.
pub fn token_to_data_type(parser: &mut Parser) -> Result<DataType, String> {
    let token = parser.current_token()?;
    if token.token_type != TokenTypes::Identifier {
        return Err(parser.format_error());
    }
    let data_type = DataType::from_sql_name(token.value).ok_or_else(|| parser.format_error())?;
    parser.advance()?;

    if parser.current_token()?.token_type == TokenTypes::LeftParen {
        parser.advance()?;
        loop {
            expect_token_type(parser, TokenTypes::IntLiteral)?;
            parser.advance()?;
            match parser.current_token()?.token_type {
                TokenTypes::Comma => parser.advance()?,
                TokenTypes::RightParen => {
                    parser.advance()?;
                    break;
                }
                _ => return Err(parser.format_error()),
            }
        }
    }
    return Ok(data_type);
}

pub fn token_to_string(token: &Token) -> String {
    match token.token_type {
        TokenTypes::String => format!("'{}'", token.value),
        TokenTypes::EOF
        | TokenTypes::SemiColon
        | TokenTypes::LeftParen
        | TokenTypes::RightParen => token.value.to_string(),
        _ => token.value.to_string() + " ",
    }
}

pub fn format_statement_tokens(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        result += &token_to_string(token);
    }
    return result.replace(" ;", ";").replace(" ,", ",").replace(" )", ")").trim_end().to_string();
}
