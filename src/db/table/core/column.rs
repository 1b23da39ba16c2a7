use chrono::Local;

use crate::db::table::core::value::{DataType, Value};
use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Clone)]
pub enum DefaultValue {
    Value(Value),
    CurrentTimestamp,
}

impl DefaultValue {
    pub fn evaluate(&self) -> Value {
        match self {
            DefaultValue::Value(value) => value.clone(),
            DefaultValue::CurrentTimestamp => Value::Timestamp(Local::now().naive_local()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub default: Option<DefaultValue>,
}

impl ColumnDefinition {
    /// A nullable column with no constraints.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_current_timestamp(mut self) -> Self {
        self.default = Some(DefaultValue::CurrentTimestamp);
        self
    }

    /// True when a missing or NULL value is filled from the table's allocator.
    pub fn assigns_surrogate_key(&self) -> bool {
        self.primary_key && self.data_type == DataType::Integer
    }

    /// Coerces `value` to this column's type and enforces nullability.
    pub fn admit(&self, table: &str, value: &Value) -> Result<Value> {
        if value.is_null() {
            if self.nullable {
                return Ok(Value::Null);
            }
            return Err(Error::NotNull {
                table: table.to_string(),
                column: self.name.clone(),
            });
        }
        value
            .coerce_to(self.data_type)
            .ok_or_else(|| Error::type_mismatch(&self.name, self.data_type, value))
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.auto_increment && !self.assigns_surrogate_key() {
            return Err(Error::InvalidSchema(format!(
                "AUTOINCREMENT is only allowed on an INTEGER PRIMARY KEY (column `{}`)",
                self.name
            )));
        }
        if let Some(DefaultValue::Value(value)) = &self.default {
            if value.coerce_to(self.data_type).is_none() {
                return Err(Error::type_mismatch(&self.name, self.data_type, value));
            }
        }
        if self.default == Some(DefaultValue::CurrentTimestamp)
            && self.data_type != DataType::Timestamp
        {
            return Err(Error::type_mismatch(&self.name, self.data_type, "CURRENT_TIMESTAMP"));
        }
        Ok(())
    }
}
