use crate::interpreter::{
    ast::{
        SqlStatement,
        helpers::token::format_statement_tokens,
        statement_builder::{DefaultStatementBuilder, StatementBuilder},
    },
    tokenizer::scanner::Token,
    tokenizer::token::TokenTypes,
};

pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    start: usize,
    current: usize,
    placeholders: usize,
    builder: &'a dyn StatementBuilder,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self::with_builder(tokens, &DefaultStatementBuilder)
    }

    pub fn with_builder(tokens: Vec<Token<'a>>, builder: &'a dyn StatementBuilder) -> Self {
        Self {
            tokens,
            start: 0,
            current: 0,
            placeholders: 0,
            builder,
        }
    }

    pub fn line_num(&self) -> Result<usize, String> {
        Ok(self.current_token()?.line_num)
    }

    pub fn current_token(&self) -> Result<&Token<'a>, String> {
        if self.current >= self.tokens.len() {
            return Err(self.format_error());
        }
        return Ok(&self.tokens[self.current]);
    }

    pub fn peek_token(&self) -> Result<&Token<'a>, String> {
        if self.current + 1 >= self.tokens.len() {
            return Err(self.format_error());
        }
        return Ok(&self.tokens[self.current + 1]);
    }

    pub fn get_sql_statement_text(&self) -> String {
        format_statement_tokens(&self.tokens[self.start..self.current])
    }

    /// Hands out the index for the next `?` in the current statement.
    pub fn next_placeholder(&mut self) -> usize {
        let index = self.placeholders;
        self.placeholders += 1;
        return index;
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    pub fn advance(&mut self) -> Result<(), String> {
        if let Ok(token) = self.current_token() {
            if token.token_type == TokenTypes::SemiColon || token.token_type == TokenTypes::EOF {
                return Err(self.format_error());
            }
        }
        self.current += 1;
        return Ok(());
    }

    /// Steps over the statement terminator. End of input also terminates a
    /// statement and is left in place.
    pub fn advance_past_semicolon(&mut self) -> Result<(), String> {
        match self.current_token() {
            Ok(token) if token.token_type == TokenTypes::SemiColon => {
                self.current += 1;
                Ok(())
            }
            Ok(token) if token.token_type == TokenTypes::EOF => Ok(()),
            _ => Err("Expected token type: SemiColon was not found".to_string()),
        }
    }

    pub fn format_error(&self) -> String {
        if self.current < self.tokens.len() && self.tokens[self.current].token_type != TokenTypes::EOF {
            let token = &self.tokens[self.current];
            format!(
                "Error at line {:?}, column {:?}: Unexpected value: {}",
                token.line_num, token.col_num, token.value
            )
        } else {
            "Error at end of input.".to_string()
        }
    }

    pub fn format_error_nearby(&self) -> String {
        if self.current < self.tokens.len() && self.tokens[self.current].token_type != TokenTypes::EOF {
            let token = &self.tokens[self.current];
            format!("Error near line {:?}, column {:?}", token.line_num, token.col_num)
        } else {
            "Error at end of input.".to_string()
        }
    }

    pub fn next_statement(&mut self) -> Option<Result<SqlStatement, String>> {
        while let Ok(token) = self.current_token() {
            if token.token_type != TokenTypes::SemiColon {
                break;
            }
            self.current += 1;
        }
        self.start = self.current;
        self.placeholders = 0;
        let token_type = match self.current_token() {
            Ok(token) => token.token_type,
            Err(error) => return Some(Err(error)),
        };
        match token_type {
            TokenTypes::EOF => None,
            TokenTypes::Create => Some(self.builder.build_create(self)),
            TokenTypes::Drop => Some(self.builder.build_drop(self)),
            TokenTypes::Insert => Some(self.builder.build_insert(self)),
            TokenTypes::Select => Some(self.builder.build_select(self)),
            TokenTypes::Update => Some(self.builder.build_update(self)),
            TokenTypes::Delete => Some(self.builder.build_delete(self)),
            TokenTypes::Begin => Some(self.builder.build_begin(self)),
            TokenTypes::Commit | TokenTypes::End => Some(self.builder.build_commit(self)),
            TokenTypes::Rollback => Some(self.builder.build_rollback(self)),
            _ => Some(Err(self.format_error())),
        }
    }
}
