use crate::interpreter::ast::SqlStatement;
use crate::interpreter::ast::parser::Parser;
use crate::interpreter::ast::{
    create_statement, delete_statement, drop_statement, insert_statement, select_statement,
    transaction_statements, update_statement,
};

pub trait StatementBuilder {
    fn build_create(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_drop(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_insert(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_select(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_update(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_delete(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_begin(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_commit(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
    fn build_rollback(&self, parser: &mut Parser) -> Result<SqlStatement, String>;
}

pub struct DefaultStatementBuilder;

impl StatementBuilder for DefaultStatementBuilder {
    fn build_create(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        create_statement::build(parser)
    }

    fn build_drop(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        drop_statement::build(parser)
    }

    fn build_insert(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        insert_statement::build(parser)
    }

    fn build_select(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        select_statement::build(parser)
    }

    fn build_update(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        update_statement::build(parser)
    }

    fn build_delete(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        delete_statement::build(parser)
    }

    fn build_begin(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        transaction_statements::build_begin(parser)
    }

    fn build_commit(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        transaction_statements::build_commit(parser)
    }

    fn build_rollback(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        transaction_statements::build_rollback(parser)
    }
}

#[cfg(test)]
pub struct MockStatementBuilder;
#[cfg(test)]
use crate::interpreter::ast::{CreateTableStatement, InsertIntoStatement, SelectColumns, SelectStatement};

#[cfg(test)]
impl StatementBuilder for MockStatementBuilder {
    fn build_create(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        parser.advance()?;
        parser.advance_past_semicolon()?;
        Ok(SqlStatement::CreateTable(CreateTableStatement {
            table_name: "users".to_string(),
            existence_check: None,
            columns: vec![],
        }))
    }

    fn build_drop(&self, _parser: &mut Parser) -> Result<SqlStatement, String> {
        unimplemented!()
    }

    fn build_insert(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        parser.advance()?;
        parser.advance_past_semicolon()?;
        Ok(SqlStatement::InsertInto(InsertIntoStatement {
            table_name: "users".to_string(),
            columns: None,
            values: vec![],
        }))
    }

    fn build_select(&self, parser: &mut Parser) -> Result<SqlStatement, String> {
        parser.advance()?;
        parser.advance_past_semicolon()?;
        Ok(SqlStatement::Select(SelectStatement {
            table_name: "users".to_string(),
            columns: SelectColumns::All,
            where_clause: None,
            order_by_clause: None,
            limit_clause: None,
        }))
    }

    fn build_update(&self, _parser: &mut Parser) -> Result<SqlStatement, String> {
        unimplemented!()
    }

    fn build_delete(&self, _parser: &mut Parser) -> Result<SqlStatement, String> {
        unimplemented!()
    }

    fn build_begin(&self, _parser: &mut Parser) -> Result<SqlStatement, String> {
        unimplemented!()
    }

    fn build_commit(&self, _parser: &mut Parser) -> Result<SqlStatement, String> {
        unimplemented!()
    }

    fn build_rollback(&self, _parser: &mut Parser) -> Result<SqlStatement, String> {
        unimplemented!()
    }
}
