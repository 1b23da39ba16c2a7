use crate::interpreter::tokenizer::scanner::Token;
use crate::interpreter::tokenizer::token::TokenTypes;

pub fn token(tt: TokenTypes, val: &'static str) -> Token<'static> {
    Token {
        token_type: tt,
        value: val,
        col_num: 0,
        line_num: 1,
    }
}

pub fn token_with_location(tt: TokenTypes, val: &'static str, col: usize, line: usize) -> Token<'static> {
    Token {
        token_type: tt,
        value: val,
        col_num: col,
        line_num: line,
    }
}
