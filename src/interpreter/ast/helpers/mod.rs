pub mod common;
pub mod limit_clause;
pub mod order_by_clause;
pub mod token;
pub mod where_clause;
