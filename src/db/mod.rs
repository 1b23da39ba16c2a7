pub mod database;
pub mod results;
pub mod session;
pub mod table;
pub mod transactions;
