use crate::interpreter::ast::helpers::token::expect_token_type;
use crate::interpreter::ast::{OrderByClause, OrderByDirection, parser::Parser};
use crate::interpreter::tokenizer::token::TokenTypes;

pub fn get_order_by(parser: &mut Parser) -> Result<Option<OrderByClause>, String> {
    if expect_token_type(parser, TokenTypes::Order).is_err() {
        return Ok(None);
    }
    parser.advance()?;

    expect_token_type(parser, TokenTypes::By)?;
    parser.advance()?;

    let mut columns = vec![];
    let mut directions = vec![];
    loop {
        let token = parser.current_token()?;
        expect_token_type(parser, TokenTypes::Identifier)?;
        columns.push(token.value.to_string());
        parser.advance()?;

        let direction = match parser.current_token()?.token_type {
            TokenTypes::Asc => {
                parser.advance()?;
                OrderByDirection::Asc
            }
            TokenTypes::Desc => {
                parser.advance()?;
                OrderByDirection::Desc
            }
            _ => OrderByDirection::Asc,
        };
        directions.push(direction);

        if parser.current_token()?.token_type != TokenTypes::Comma {
            break;
        }
        parser.advance()?;
    }

    return Ok(Some(OrderByClause { columns, directions }));
}
