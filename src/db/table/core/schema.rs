use std::collections::HashSet;

use crate::db::table::core::column::ColumnDefinition;
use crate::error::{Error, Result};

/// The shape of one table: its name and ordered column definitions.
#[derive(Debug, PartialEq, Clone)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnDefinition>,
    primary_key: Option<usize>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Result<Self> {
        let name = name.into();
        if columns.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "Table `{}` must have at least one column",
                name
            )));
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "Duplicate column `{}` in table `{}`",
                    column.name, name
                )));
            }
            column.validate()?;
        }

        let mut keys = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.primary_key)
            .map(|(i, _)| i);
        let primary_key = keys.next();
        if keys.next().is_some() {
            return Err(Error::InvalidSchema(format!(
                "Table `{}` declares more than one primary key",
                name
            )));
        }

        Ok(Self {
            name,
            columns,
            primary_key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> &ColumnDefinition {
        &self.columns[index]
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get_index_of_column(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| Error::ColumnNotFound {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn get_column(&self, column: &str) -> Result<&ColumnDefinition> {
        Ok(&self.columns[self.get_index_of_column(column)?])
    }

    /// Position of the declared primary key column, if any. Tables without
    /// one are keyed by a hidden surrogate id.
    pub fn primary_key_index(&self) -> Option<usize> {
        self.primary_key
    }
}
