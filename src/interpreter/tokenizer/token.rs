#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TokenTypes {
    // Keywords
    Create, Select, Insert, Table, From, Into, Values, Where,
    Update, Delete, Drop, Set,
    // Constraints
    Null, Primary, Key, Not, Default, AutoIncrement, CurrentTimestamp,
    // Clauses
    Order, By, Asc, Desc, Limit, Offset, If, Exists,
    // Transactions
    Begin, Transaction, Commit, End, Rollback,
    // Logical Operators
    And, Or, Is,
    Equals, NotEquals, LessThan, LessEquals, GreaterThan, GreaterEquals,
    // Single Character Tokens
    Asterisk, SemiColon, LeftParen, RightParen, Comma, Placeholder,
    // Literals
    String, IntLiteral, RealLiteral, True, False,
    // Others
    Identifier,
    EOF, Error,
}
