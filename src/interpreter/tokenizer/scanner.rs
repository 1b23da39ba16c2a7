use crate::interpreter::tokenizer::token::TokenTypes;

#[derive(Debug, PartialEq, Clone)]
pub struct Token<'a> {
    pub token_type: TokenTypes,
    pub value: &'a str,
    pub col_num: usize,
    pub line_num: usize,
}

pub struct Scanner<'a> {
    input: &'a str,
    current: usize,
    line_num: usize,
    col_num: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            current: 0,
            line_num: 1,
            col_num: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.current >= self.input.len()
    }

    fn handle_skips(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        match self.current_char() {
            ' ' | '\t' | '\r' => {
                self.advance();
                true
            }
            '\n' => {
                self.advance();
                self.line_num += 1;
                self.col_num = self.current;
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self) {
        self.current += self.current_char().len_utf8();
    }

    fn current_char(&self) -> char {
        return self.input[self.current.min(self.input.len())..]
            .chars()
            .next()
            .unwrap_or('\0');
    }

    fn peek_char(&self) -> char {
        return self.input[self.current.min(self.input.len())..]
            .chars()
            .nth(1)
            .unwrap_or('\0');
    }

    fn token(&self, start: usize, end: usize, token_type: TokenTypes) -> Token<'a> {
        Token {
            token_type,
            value: &self.input[start..end],
            col_num: start - self.col_num,
            line_num: self.line_num,
        }
    }

    // Consumes the current character as the last one of the token.
    fn build_token(&mut self, start: usize, token_type: TokenTypes) -> Token<'a> {
        self.advance();
        self.token(start, self.current, token_type)
    }

    fn read_string(&mut self, start: usize) -> Token<'a> {
        self.advance();
        loop {
            if self.at_end() {
                return self.token(start, self.input.len(), TokenTypes::Error);
            }
            match (self.current_char(), self.peek_char()) {
                ('\'', '\'') => {
                    self.advance();
                    self.advance();
                }
                ('\'', _) => {
                    self.advance();
                    let mut token = self.token(start, self.current, TokenTypes::String);
                    token.value = &self.input[start + 1..self.current - 1];
                    return token;
                }
                _ => self.advance(),
            }
        }
    }

    fn read_quoted_identifier(&mut self, start: usize, quote: char) -> Token<'a> {
        self.advance();
        while !self.at_end() && self.current_char() != quote {
            self.advance();
        }
        if self.at_end() {
            return self.token(start, self.input.len(), TokenTypes::Error);
        }
        self.advance();
        let mut token = self.token(start, self.current, TokenTypes::Identifier);
        token.value = &self.input[start + 1..self.current - 1];
        return token;
    }

    fn read_identifier(&mut self, start: usize) -> TokenTypes {
        while self.peek_char().is_alphanumeric() || self.peek_char() == '_' {
            self.advance();
        }
        let end = self.current + self.current_char().len_utf8();
        match &self.input[start..end] {
            slice if slice.eq_ignore_ascii_case("CREATE") => TokenTypes::Create,
            slice if slice.eq_ignore_ascii_case("SELECT") => TokenTypes::Select,
            slice if slice.eq_ignore_ascii_case("INSERT") => TokenTypes::Insert,
            slice if slice.eq_ignore_ascii_case("TABLE") => TokenTypes::Table,
            slice if slice.eq_ignore_ascii_case("FROM") => TokenTypes::From,
            slice if slice.eq_ignore_ascii_case("INTO") => TokenTypes::Into,
            slice if slice.eq_ignore_ascii_case("VALUES") => TokenTypes::Values,
            slice if slice.eq_ignore_ascii_case("WHERE") => TokenTypes::Where,
            slice if slice.eq_ignore_ascii_case("UPDATE") => TokenTypes::Update,
            slice if slice.eq_ignore_ascii_case("DELETE") => TokenTypes::Delete,
            slice if slice.eq_ignore_ascii_case("DROP") => TokenTypes::Drop,
            slice if slice.eq_ignore_ascii_case("SET") => TokenTypes::Set,
            slice if slice.eq_ignore_ascii_case("NULL") => TokenTypes::Null,
            slice if slice.eq_ignore_ascii_case("PRIMARY") => TokenTypes::Primary,
            slice if slice.eq_ignore_ascii_case("KEY") => TokenTypes::Key,
            slice if slice.eq_ignore_ascii_case("NOT") => TokenTypes::Not,
            slice if slice.eq_ignore_ascii_case("DEFAULT") => TokenTypes::Default,
            slice if slice.eq_ignore_ascii_case("AUTOINCREMENT") => TokenTypes::AutoIncrement,
            slice if slice.eq_ignore_ascii_case("AUTO_INCREMENT") => TokenTypes::AutoIncrement,
            slice if slice.eq_ignore_ascii_case("CURRENT_TIMESTAMP") => TokenTypes::CurrentTimestamp,
            slice if slice.eq_ignore_ascii_case("ORDER") => TokenTypes::Order,
            slice if slice.eq_ignore_ascii_case("BY") => TokenTypes::By,
            slice if slice.eq_ignore_ascii_case("ASC") => TokenTypes::Asc,
            slice if slice.eq_ignore_ascii_case("DESC") => TokenTypes::Desc,
            slice if slice.eq_ignore_ascii_case("LIMIT") => TokenTypes::Limit,
            slice if slice.eq_ignore_ascii_case("OFFSET") => TokenTypes::Offset,
            slice if slice.eq_ignore_ascii_case("IF") => TokenTypes::If,
            slice if slice.eq_ignore_ascii_case("EXISTS") => TokenTypes::Exists,
            slice if slice.eq_ignore_ascii_case("BEGIN") => TokenTypes::Begin,
            slice if slice.eq_ignore_ascii_case("TRANSACTION") => TokenTypes::Transaction,
            slice if slice.eq_ignore_ascii_case("COMMIT") => TokenTypes::Commit,
            slice if slice.eq_ignore_ascii_case("END") => TokenTypes::End,
            slice if slice.eq_ignore_ascii_case("ROLLBACK") => TokenTypes::Rollback,
            slice if slice.eq_ignore_ascii_case("AND") => TokenTypes::And,
            slice if slice.eq_ignore_ascii_case("OR") => TokenTypes::Or,
            slice if slice.eq_ignore_ascii_case("IS") => TokenTypes::Is,
            slice if slice.eq_ignore_ascii_case("TRUE") => TokenTypes::True,
            slice if slice.eq_ignore_ascii_case("FALSE") => TokenTypes::False,
            _ => TokenTypes::Identifier,
        }
    }

    fn read_digits(&mut self) {
        while self.peek_char().is_ascii_digit() {
            self.advance();
        }
    }

    fn read_number(&mut self) -> TokenTypes {
        let mut token_type = TokenTypes::IntLiteral;
        self.read_digits();
        if self.peek_char() == '.' {
            token_type = TokenTypes::RealLiteral;
            self.advance();
            self.read_digits();
        }
        if self.peek_char() == 'e' || self.peek_char() == 'E' {
            token_type = TokenTypes::RealLiteral;
            self.advance();
            if self.peek_char() == '-' || self.peek_char() == '+' {
                self.advance();
            }
            if !self.peek_char().is_ascii_digit() {
                return TokenTypes::Error;
            }
            self.read_digits();
        }
        return token_type;
    }

    fn skip_line(&mut self) {
        while !self.at_end() && self.current_char() != '\n' {
            self.advance();
        }
    }

    fn read_block_comment(&mut self, start: usize) -> Option<Token<'a>> {
        self.advance();
        self.advance();
        while !self.at_end() {
            if self.current_char() == '*' && self.peek_char() == '/' {
                self.advance();
                self.advance();
                return self.next_token();
            }
            if self.current_char() == '\n' {
                self.line_num += 1;
                self.col_num = self.current + 1;
            }
            self.advance();
        }
        return Some(self.token(start, self.input.len(), TokenTypes::Error));
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        while self.handle_skips() {}

        if self.at_end() {
            return None;
        }
        let start = self.current;
        match self.current_char() {
            '\'' => Some(self.read_string(start)),
            '"' => Some(self.read_quoted_identifier(start, '"')),
            '`' => Some(self.read_quoted_identifier(start, '`')),
            c if c.is_alphabetic() || c == '_' => {
                let token_type = self.read_identifier(start);
                Some(self.build_token(start, token_type))
            }
            c if c.is_ascii_digit() => {
                let token_type = self.read_number();
                Some(self.build_token(start, token_type))
            }
            '-' if self.peek_char().is_ascii_digit() => {
                self.advance();
                let token_type = self.read_number();
                Some(self.build_token(start, token_type))
            }
            '-' if self.peek_char() == '-' => {
                self.skip_line();
                self.next_token()
            }
            '#' => {
                self.skip_line();
                self.next_token()
            }
            '/' if self.peek_char() == '*' => self.read_block_comment(start),
            '*' => Some(self.build_token(start, TokenTypes::Asterisk)),
            ';' => Some(self.build_token(start, TokenTypes::SemiColon)),
            '(' => Some(self.build_token(start, TokenTypes::LeftParen)),
            ')' => Some(self.build_token(start, TokenTypes::RightParen)),
            ',' => Some(self.build_token(start, TokenTypes::Comma)),
            '?' => Some(self.build_token(start, TokenTypes::Placeholder)),
            '=' => Some(self.build_token(start, TokenTypes::Equals)),
            '!' if self.peek_char() == '=' => {
                self.advance();
                Some(self.build_token(start, TokenTypes::NotEquals))
            }
            '<' => match self.peek_char() {
                '=' => {
                    self.advance();
                    Some(self.build_token(start, TokenTypes::LessEquals))
                }
                '>' => {
                    self.advance();
                    Some(self.build_token(start, TokenTypes::NotEquals))
                }
                _ => Some(self.build_token(start, TokenTypes::LessThan)),
            },
            '>' => {
                if self.peek_char() == '=' {
                    self.advance();
                    Some(self.build_token(start, TokenTypes::GreaterEquals))
                } else {
                    Some(self.build_token(start, TokenTypes::GreaterThan))
                }
            }
            _ => Some(self.build_token(start, TokenTypes::Error)),
        }
    }
}
