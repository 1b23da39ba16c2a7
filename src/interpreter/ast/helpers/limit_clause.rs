use crate::interpreter::ast::helpers::token::expect_token_type;
use crate::interpreter::ast::{LimitClause, parser::Parser};
use crate::interpreter::tokenizer::token::TokenTypes;

pub fn get_limit(parser: &mut Parser) -> Result<Option<LimitClause>, String> {
    if expect_token_type(parser, TokenTypes::Limit).is_err() {
        return Ok(None);
    }
    parser.advance()?;
    let limit = get_count(parser)?;

    if parser.current_token()?.token_type != TokenTypes::Offset {
        return Ok(Some(LimitClause { limit, offset: None }));
    }
    parser.advance()?;
    let offset = get_count(parser)?;

    Ok(Some(LimitClause {
        limit,
        offset: Some(offset),
    }))
}

// A non-negative integer literal.
fn get_count(parser: &mut Parser) -> Result<usize, String> {
    expect_token_type(parser, TokenTypes::IntLiteral)?;
    let value = parser.current_token()?.value;
    let count = value.parse::<usize>().map_err(|_| parser.format_error())?;
    parser.advance()?;
    return Ok(count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::ast::test_utils::token;

    #[test]
    fn limit_clause_is_generated_correctly() {
        // LIMIT 10 OFFSET 5;
        let tokens = vec![
            token(TokenTypes::Limit, "LIMIT"),
            token(TokenTypes::IntLiteral, "10"),
            token(TokenTypes::Offset, "OFFSET"),
            token(TokenTypes::IntLiteral, "5"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let expected = Some(LimitClause {
            limit: 10,
            offset: Some(5),
        });
        assert_eq!(Ok(expected), get_limit(&mut parser));
        assert_eq!(parser.current_token().unwrap().token_type, TokenTypes::SemiColon);
    }

    #[test]
    fn limit_without_offset() {
        let tokens = vec![
            token(TokenTypes::Limit, "LIMIT"),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::EOF, ""),
        ];
        let mut parser = Parser::new(tokens);
        assert_eq!(Ok(Some(LimitClause { limit: 1, offset: None })), get_limit(&mut parser));
    }

    #[test]
    fn negative_limit_is_rejected() {
        let tokens = vec![
            token(TokenTypes::Limit, "LIMIT"),
            token(TokenTypes::IntLiteral, "-1"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        assert_eq!(
            get_limit(&mut parser),
            Err("Error at line 1, column 0: Unexpected value: -1".to_string())
        );
    }
}
