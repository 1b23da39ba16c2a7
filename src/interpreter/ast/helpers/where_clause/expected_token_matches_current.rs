use crate::interpreter::ast::{LogicalOperator, Parentheses, WhereStackElement, parser::Parser};

#[derive(PartialEq, Debug)]
pub enum WhereClauseExpectedNextToken {
    ConditionLeftParenNot,
    LogicalOperatorRightParen,
}

// Checks the current where stack element against the one before it.
// Raises parser errors for strings like `WHERE NOT AND 1 = 1`, `WHERE 1 = 1 2 = 2`, or `WHERE ()`.
pub fn next_expected_token_from_current(
    expected_token: &WhereClauseExpectedNextToken,
    where_stack_element: &WhereStackElement,
    parser: &Parser,
) -> Result<WhereClauseExpectedNextToken, String> {
    let (required, next) = match where_stack_element {
        WhereStackElement::Condition(_) => (
            WhereClauseExpectedNextToken::ConditionLeftParenNot,
            WhereClauseExpectedNextToken::LogicalOperatorRightParen,
        ),
        WhereStackElement::LogicalOperator(LogicalOperator::Not) => (
            WhereClauseExpectedNextToken::ConditionLeftParenNot,
            WhereClauseExpectedNextToken::ConditionLeftParenNot,
        ),
        WhereStackElement::LogicalOperator(_) => (
            WhereClauseExpectedNextToken::LogicalOperatorRightParen,
            WhereClauseExpectedNextToken::ConditionLeftParenNot,
        ),
        WhereStackElement::Parentheses(Parentheses::Left) => (
            WhereClauseExpectedNextToken::ConditionLeftParenNot,
            WhereClauseExpectedNextToken::ConditionLeftParenNot,
        ),
        WhereStackElement::Parentheses(Parentheses::Right) => (
            WhereClauseExpectedNextToken::LogicalOperatorRightParen,
            WhereClauseExpectedNextToken::LogicalOperatorRightParen,
        ),
    };
    if *expected_token != required {
        return Err(parser.format_error_nearby());
    }
    return Ok(next);
}
