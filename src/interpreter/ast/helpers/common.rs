use crate::interpreter::{
    ast::{ExistenceCheck, helpers::token::expect_token_type, parser::Parser},
    tokenizer::token::TokenTypes,
};

// Returns a list of Strings from the tokens when they are formated as "identifier, identifier, ..."
pub fn tokens_to_identifier_list(parser: &mut Parser) -> Result<Vec<String>, String> {
    let mut identifiers: Vec<String> = vec![];
    loop {
        let token = parser.current_token()?;
        expect_token_type(parser, TokenTypes::Identifier)?;

        identifiers.push(token.value.to_string());
        parser.advance()?;
        let token = parser.current_token()?;
        if token.token_type != TokenTypes::Comma {
            break;
        }
        parser.advance()?;
    }
    return Ok(identifiers);
}

pub fn get_table_name(parser: &mut Parser) -> Result<String, String> {
    let token = parser.current_token()?;
    expect_token_type(parser, TokenTypes::Identifier)?;
    let result = token.value.to_string();
    parser.advance()?;
    return Ok(result);
}

pub fn exists_clause(parser: &mut Parser, check_type: ExistenceCheck) -> Result<Option<ExistenceCheck>, String> {
    if parser.current_token()?.token_type != TokenTypes::If {
        return Ok(None);
    }
    parser.advance()?;
    let token_type = parser.current_token()?.token_type;
    let existence_check = match (token_type, check_type) {
        (TokenTypes::Not, ExistenceCheck::IfNotExists) => {
            parser.advance()?;
            expect_token_type(parser, TokenTypes::Exists)?;
            ExistenceCheck::IfNotExists
        }
        (TokenTypes::Exists, ExistenceCheck::IfExists) => ExistenceCheck::IfExists,
        (_, _) => return Err(parser.format_error()),
    };
    parser.advance()?;
    return Ok(Some(existence_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::ast::test_utils::token;

    #[test]
    fn identifier_list_stops_after_last_identifier() {
        // id, name) ...
        let tokens = vec![
            token(TokenTypes::Identifier, "id"),
            token(TokenTypes::Comma, ","),
            token(TokenTypes::Identifier, "name"),
            token(TokenTypes::RightParen, ")"),
        ];
        let mut parser = Parser::new(tokens);
        let result = tokens_to_identifier_list(&mut parser);
        assert_eq!(result, Ok(vec!["id".to_string(), "name".to_string()]));
        assert_eq!(parser.current_token().unwrap().token_type, TokenTypes::RightParen);
    }

    #[test]
    fn exists_clause_matches_the_expected_form_only() {
        let tokens = vec![
            token(TokenTypes::If, "IF"),
            token(TokenTypes::Not, "NOT"),
            token(TokenTypes::Exists, "EXISTS"),
            token(TokenTypes::Identifier, "users"),
        ];
        let mut parser = Parser::new(tokens);
        assert_eq!(
            exists_clause(&mut parser, ExistenceCheck::IfNotExists),
            Ok(Some(ExistenceCheck::IfNotExists))
        );
        assert_eq!(parser.current_token().unwrap().value, "users");

        let tokens = vec![
            token(TokenTypes::If, "IF"),
            token(TokenTypes::Not, "NOT"),
            token(TokenTypes::Exists, "EXISTS"),
        ];
        let mut parser = Parser::new(tokens);
        assert!(exists_clause(&mut parser, ExistenceCheck::IfExists).is_err());

        let mut parser = Parser::new(vec![token(TokenTypes::Identifier, "users")]);
        assert_eq!(exists_clause(&mut parser, ExistenceCheck::IfExists), Ok(None));
    }
}
