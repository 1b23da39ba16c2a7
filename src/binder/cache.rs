use std::collections::{HashMap, VecDeque};

use crate::binder::PreparedStatement;

/// Prepared statements keyed by SQL text. Bounded; when full the oldest
/// entry goes first.
#[derive(Debug)]
pub struct StatementCache {
    capacity: usize,
    statements: HashMap<String, PreparedStatement>,
    order: VecDeque<String>,
}

impl StatementCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            statements: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn get(&self, sql: &str) -> Option<&PreparedStatement> {
        self.statements.get(sql)
    }

    pub fn insert(&mut self, sql: &str, statement: PreparedStatement) {
        if self.capacity == 0 {
            return;
        }
        if self.statements.insert(sql.to_string(), statement).is_some() {
            return;
        }
        self.order.push_back(sql.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.statements.remove(&oldest);
            }
        }
    }
}
