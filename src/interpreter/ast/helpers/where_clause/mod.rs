mod expected_token_matches_current;
mod where_condition;

use expected_token_matches_current::{WhereClauseExpectedNextToken, next_expected_token_from_current};

use crate::interpreter::ast::{
    LogicalOperator, Parentheses, WhereStackElement, WhereStackOperators,
    helpers::{token::expect_token_type, where_clause::where_condition::get_condition},
    parser::Parser,
};
use crate::interpreter::tokenizer::token::TokenTypes;

// The where clause is stored in Reverse Polish Notation, built from the infix
// text with the shunting yard algorithm.
// Operator precedence is given as '()' > 'NOT' > 'AND' > 'OR'
pub fn get_where_clause(parser: &mut Parser) -> Result<Option<Vec<WhereStackElement>>, String> {
    if expect_token_type(parser, TokenTypes::Where).is_err() {
        return Ok(None);
    }
    parser.advance()?;
    let mut where_stack: Vec<WhereStackElement> = vec![];
    let mut operator_stack: Vec<WhereStackOperators> = vec![];
    let mut expected_token = WhereClauseExpectedNextToken::ConditionLeftParenNot;

    while let Some(where_stack_element) = get_where_stack_element(parser, &operator_stack)? {
        expected_token = next_expected_token_from_current(&expected_token, &where_stack_element, parser)?;
        match where_stack_element {
            WhereStackElement::Condition(condition) => where_stack.push(WhereStackElement::Condition(condition)),
            WhereStackElement::Parentheses(Parentheses::Left) => {
                operator_stack.push(WhereStackOperators::Parentheses(Parentheses::Left));
            }
            WhereStackElement::Parentheses(Parentheses::Right) => {
                while let Some(current_operator) = operator_stack.pop() {
                    match current_operator {
                        WhereStackOperators::Parentheses(_) => break,
                        WhereStackOperators::LogicalOperator(logical_operator) => {
                            where_stack.push(WhereStackElement::LogicalOperator(logical_operator))
                        }
                    }
                }
            }
            WhereStackElement::LogicalOperator(logical_operator) => {
                while let Some(WhereStackOperators::LogicalOperator(current_logical_operator)) = operator_stack.last() {
                    // NOT is right associative, a second NOT stays on the stack.
                    if logical_operator.is_greater_precedence(current_logical_operator)
                        || logical_operator == LogicalOperator::Not
                    {
                        break;
                    }
                    where_stack.push(WhereStackElement::LogicalOperator(*current_logical_operator));
                    operator_stack.pop();
                }
                operator_stack.push(WhereStackOperators::LogicalOperator(logical_operator));
            }
        }
    }
    if expected_token != WhereClauseExpectedNextToken::LogicalOperatorRightParen {
        return Err(parser.format_error());
    }
    while let Some(operator) = operator_stack.pop() {
        match operator {
            WhereStackOperators::LogicalOperator(_) => where_stack.push(operator.into_where_stack_element()),
            _ => return Err("Mismatched parentheses found.".to_string()),
        }
    }

    return Ok(Some(where_stack));
}

fn get_where_stack_element(
    parser: &mut Parser,
    operator_stack: &[WhereStackOperators],
) -> Result<Option<WhereStackElement>, String> {
    let token_type = parser.current_token()?.token_type;
    match token_type {
        TokenTypes::And | TokenTypes::Or | TokenTypes::Not | TokenTypes::LeftParen | TokenTypes::RightParen => {
            if token_type == TokenTypes::RightParen
                && !operator_stack.contains(&WhereStackOperators::Parentheses(Parentheses::Left))
            {
                return Err(parser.format_error());
            }
            let where_stack_element = token_type_to_where_stack_element(token_type);
            parser.advance()?;
            Ok(Some(where_stack_element))
        }
        TokenTypes::Identifier
        | TokenTypes::IntLiteral
        | TokenTypes::RealLiteral
        | TokenTypes::String
        | TokenTypes::True
        | TokenTypes::False
        | TokenTypes::Null
        | TokenTypes::Placeholder => Ok(Some(WhereStackElement::Condition(get_condition(parser)?))),
        _ => Ok(None),
    }
}

fn token_type_to_where_stack_element(token_type: TokenTypes) -> WhereStackElement {
    match token_type {
        TokenTypes::And => WhereStackElement::LogicalOperator(LogicalOperator::And),
        TokenTypes::Or => WhereStackElement::LogicalOperator(LogicalOperator::Or),
        TokenTypes::Not => WhereStackElement::LogicalOperator(LogicalOperator::Not),
        TokenTypes::LeftParen => WhereStackElement::Parentheses(Parentheses::Left),
        TokenTypes::RightParen => WhereStackElement::Parentheses(Parentheses::Right),
        _ => unreachable!("Invalid token type for where stack element"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::core::value::Value;
    use crate::interpreter::ast::test_utils::token;
    use crate::interpreter::ast::{Expr, Operator, WhereCondition};

    fn simple_condition(column: &str, operator: Operator, value: Expr) -> WhereStackElement {
        WhereStackElement::Condition(WhereCondition {
            column: column.to_string(),
            operator,
            value,
        })
    }

    #[test]
    fn returns_none_when_no_where_keyword_present() {
        let tokens = vec![
            token(TokenTypes::Order, "ORDER"),
            token(TokenTypes::By, "BY"),
        ];
        let mut parser = Parser::new(tokens);
        assert_eq!(get_where_clause(&mut parser), Ok(None));
        assert_eq!(parser.current_token().unwrap().token_type, TokenTypes::Order);
    }

    #[test]
    fn parses_and_condition_with_correct_rpn_order() {
        // WHERE username = ? AND password = ?;
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Identifier, "username"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::Placeholder, "?"),
            token(TokenTypes::And, "AND"),
            token(TokenTypes::Identifier, "password"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::Placeholder, "?"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let result = get_where_clause(&mut parser);
        let expected = Some(vec![
            simple_condition("username", Operator::Equals, Expr::Placeholder(0)),
            simple_condition("password", Operator::Equals, Expr::Placeholder(1)),
            WhereStackElement::LogicalOperator(LogicalOperator::And),
        ]);
        assert_eq!(Ok(expected), result);
        assert_eq!(parser.current_token().unwrap().token_type, TokenTypes::SemiColon);
    }

    #[test]
    fn respects_logical_operator_precedence() {
        // WHERE NOT id = 1 AND name = 'John' OR age > 20;
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Not, "NOT"),
            token(TokenTypes::Identifier, "id"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::And, "AND"),
            token(TokenTypes::Identifier, "name"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::String, "John"),
            token(TokenTypes::Or, "OR"),
            token(TokenTypes::Identifier, "age"),
            token(TokenTypes::GreaterThan, ">"),
            token(TokenTypes::IntLiteral, "20"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let result = get_where_clause(&mut parser);
        let expected = Some(vec![
            simple_condition("id", Operator::Equals, Expr::Value(Value::Integer(1))),
            WhereStackElement::LogicalOperator(LogicalOperator::Not),
            simple_condition("name", Operator::Equals, Expr::Value(Value::Text("John".to_string()))),
            WhereStackElement::LogicalOperator(LogicalOperator::And),
            simple_condition("age", Operator::GreaterThan, Expr::Value(Value::Integer(20))),
            WhereStackElement::LogicalOperator(LogicalOperator::Or),
        ]);
        assert_eq!(Ok(expected), result);
    }

    #[test]
    fn parentheses_override_precedence() {
        // WHERE a = 1 AND (b = 2 OR c = 3);
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Identifier, "a"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::And, "AND"),
            token(TokenTypes::LeftParen, "("),
            token(TokenTypes::Identifier, "b"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "2"),
            token(TokenTypes::Or, "OR"),
            token(TokenTypes::Identifier, "c"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "3"),
            token(TokenTypes::RightParen, ")"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let result = get_where_clause(&mut parser);
        let expected = Some(vec![
            simple_condition("a", Operator::Equals, Expr::Value(Value::Integer(1))),
            simple_condition("b", Operator::Equals, Expr::Value(Value::Integer(2))),
            simple_condition("c", Operator::Equals, Expr::Value(Value::Integer(3))),
            WhereStackElement::LogicalOperator(LogicalOperator::Or),
            WhereStackElement::LogicalOperator(LogicalOperator::And),
        ]);
        assert_eq!(Ok(expected), result);
    }

    #[test]
    fn double_not_stays_nested() {
        // WHERE NOT NOT a = 1;
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Not, "NOT"),
            token(TokenTypes::Not, "NOT"),
            token(TokenTypes::Identifier, "a"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        let expected = Some(vec![
            simple_condition("a", Operator::Equals, Expr::Value(Value::Integer(1))),
            WhereStackElement::LogicalOperator(LogicalOperator::Not),
            WhereStackElement::LogicalOperator(LogicalOperator::Not),
        ]);
        assert_eq!(Ok(expected), get_where_clause(&mut parser));
    }

    #[test]
    fn dangling_operator_is_an_error() {
        // WHERE a = 1 AND;
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Identifier, "a"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::And, "AND"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        assert!(get_where_clause(&mut parser).is_err());
    }

    #[test]
    fn unbalanced_parentheses_are_errors() {
        // WHERE (a = 1;
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::LeftParen, "("),
            token(TokenTypes::Identifier, "a"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        assert_eq!(
            get_where_clause(&mut parser),
            Err("Mismatched parentheses found.".to_string())
        );

        // WHERE a = 1);
        let tokens = vec![
            token(TokenTypes::Where, "WHERE"),
            token(TokenTypes::Identifier, "a"),
            token(TokenTypes::Equals, "="),
            token(TokenTypes::IntLiteral, "1"),
            token(TokenTypes::RightParen, ")"),
            token(TokenTypes::SemiColon, ";"),
        ];
        let mut parser = Parser::new(tokens);
        assert!(get_where_clause(&mut parser).is_err());
    }
}
