use crate::db::table::core::schema::TableSchema;
use crate::db::table::core::value::{DataType, Value};
use crate::error::{Error, Result};

/// Where in a statement a placeholder sits. Decides whether NULL is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// A VALUES entry of an INSERT.
    Insert,
    /// The right-hand side of an UPDATE assignment.
    Assign,
    /// A WHERE comparison operand.
    Where,
}

/// One placeholder of a prepared statement and the column it must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub index: usize,
    pub kind: SlotKind,
    pub table: String,
    pub column: String,
    pub data_type: DataType,
    pub accepts_null: bool,
}

impl Slot {
    pub fn for_column(schema: &TableSchema, index: usize, column: usize, kind: SlotKind) -> Self {
        let definition = schema.column(column);
        let accepts_null = match kind {
            SlotKind::Where => true,
            // NULL into an integer key asks the allocator for one.
            SlotKind::Insert => definition.nullable || definition.assigns_surrogate_key(),
            SlotKind::Assign => definition.nullable,
        };
        Self {
            index,
            kind,
            table: schema.name().to_string(),
            column: definition.name.clone(),
            data_type: definition.data_type,
            accepts_null,
        }
    }

    /// Checks an argument against the slot and converts it to the column type.
    pub fn admit(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            if self.accepts_null {
                return Ok(Value::Null);
            }
            return Err(Error::NotNull {
                table: self.table.clone(),
                column: self.column.clone(),
            });
        }
        value
            .coerce_to(self.data_type)
            .ok_or_else(|| Error::type_mismatch(&self.column, self.data_type, &value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::test_utils::customer_schema;

    #[test]
    fn null_acceptance_depends_on_slot_kind() {
        let schema = customer_schema();
        // id: integer primary key, name: NOT NULL text.
        assert!(Slot::for_column(&schema, 0, 0, SlotKind::Insert).accepts_null);
        assert!(!Slot::for_column(&schema, 0, 0, SlotKind::Assign).accepts_null);
        assert!(!Slot::for_column(&schema, 0, 1, SlotKind::Insert).accepts_null);
        assert!(Slot::for_column(&schema, 0, 1, SlotKind::Where).accepts_null);
    }

    #[test]
    fn admit_coerces_or_reports_type_mismatch() {
        let slot = Slot::for_column(&customer_schema(), 0, 2, SlotKind::Insert);
        assert_eq!(slot.admit(Value::Text("42".to_string())).unwrap(), Value::Integer(42));
        assert_eq!(slot.admit(Value::Float(3.0)).unwrap(), Value::Integer(3));
        assert!(matches!(
            slot.admit(Value::Text("abc".to_string())),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(slot.admit(Value::Null), Err(Error::NotNull { .. })));
    }
}
