use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::table::core::row::{Row, RowId};
use crate::db::table::core::schema::TableSchema;
use crate::db::table::index::PrimaryKeyIndex;
use crate::error::{Error, Result};

/// Insertion sequence number of a row. Scan order follows it, and it never
/// changes for the life of the row, including an undo that puts the row back.
pub type RowPosition = u64;

#[derive(Debug)]
struct Slot {
    id: RowId,
    row: Row,
}

/// The row store of one table: live rows ordered by insertion sequence plus
/// a primary key index into them. A deleted row leaves nothing behind; its
/// sequence number is enough for an undo to put it back where it was.
#[derive(Debug)]
pub struct Table {
    schema: Arc<TableSchema>,
    slots: BTreeMap<RowPosition, Slot>,
    next_position: RowPosition,
    index: PrimaryKeyIndex,
}

impl Table {
    pub fn new(schema: Arc<TableSchema>) -> Self {
        let index = PrimaryKeyIndex::new(schema.name());
        Self {
            schema,
            slots: BTreeMap::new(),
            next_position: 0,
            index,
        }
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &Arc<TableSchema> {
        &self.schema
    }

    /// Number of live rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.index.contains(id)
    }

    pub fn position(&self, id: &RowId) -> Option<RowPosition> {
        self.index.lookup(id)
    }

    pub fn get(&self, id: &RowId) -> Option<&Row> {
        let position = self.index.lookup(id)?;
        self.slots.get(&position).map(|slot| &slot.row)
    }

    /// The stored key and row for `id`.
    pub fn get_entry(&self, id: &RowId) -> Option<(&RowId, &Row)> {
        let position = self.index.lookup(id)?;
        self.slots.get(&position).map(|slot| (&slot.id, &slot.row))
    }

    pub fn insert(&mut self, id: RowId, row: Row) -> Result<RowPosition> {
        self.check_width(&row)?;
        let position = self.next_position;
        self.index.insert(id.clone(), position)?;
        self.slots.insert(position, Slot { id, row });
        self.next_position += 1;
        Ok(position)
    }

    /// Removes the row and returns its position and contents.
    pub fn delete(&mut self, id: &RowId) -> Result<(RowPosition, Row)> {
        let position = self.index.remove(id)?;
        match self.slots.remove(&position) {
            Some(slot) => Ok((position, slot.row)),
            None => unreachable!("index pointed at a missing row"),
        }
    }

    /// Puts a deleted row back at the position it was deleted from.
    pub fn restore(&mut self, position: RowPosition, id: RowId, row: Row) -> Result<()> {
        self.check_width(&row)?;
        if position >= self.next_position || self.slots.contains_key(&position) {
            return Err(Error::DuplicateKey {
                table: self.name().to_string(),
                key: id.to_string(),
            });
        }
        self.index.insert(id.clone(), position)?;
        self.slots.insert(position, Slot { id, row });
        Ok(())
    }

    /// Replaces the row in place, re-keying the index when the primary key
    /// changed. Returns the previous row.
    pub fn update(&mut self, id: &RowId, new_id: RowId, row: Row) -> Result<Row> {
        self.check_width(&row)?;
        let position = self.index.lookup(id).ok_or_else(|| Error::NotFound {
            table: self.name().to_string(),
            key: id.to_string(),
        })?;
        if new_id != *id {
            self.index.insert(new_id.clone(), position)?;
            self.index.remove(id)?;
        }
        match self.slots.get_mut(&position) {
            Some(slot) => {
                slot.id = new_id;
                Ok(std::mem::replace(&mut slot.row, row))
            }
            None => unreachable!("index pointed at a missing row"),
        }
    }

    /// Live rows in insertion order. Lazy, and restartable by calling again.
    pub fn scan(&self) -> impl Iterator<Item = (&RowId, &Row)> + '_ {
        self.slots.values().map(|slot| (&slot.id, &slot.row))
    }

    pub fn scan_where<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = (&'a RowId, &'a Row)> + 'a
    where
        P: FnMut(&Row) -> bool + 'a,
    {
        self.scan().filter(move |(_, row)| predicate(row))
    }

    fn check_width(&self, row: &Row) -> Result<()> {
        if row.len() != self.schema.width() {
            return Err(Error::InvalidSchema(format!(
                "Row has {} values but table `{}` has {} columns",
                row.len(),
                self.name(),
                self.schema.width()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::table::core::column::ColumnDefinition;
    use crate::db::table::core::value::{DataType, Value};

    fn customer_table() -> Table {
        let schema = TableSchema::new(
            "customer",
            vec![
                ColumnDefinition::new("id", DataType::Text).primary_key(),
                ColumnDefinition::new("name", DataType::Text).not_null(),
            ],
        )
        .unwrap();
        Table::new(Arc::new(schema))
    }

    fn id(key: &str) -> RowId {
        RowId::new(Value::Text(key.to_string()))
    }

    fn row(key: &str, name: &str) -> Row {
        Row(vec![Value::Text(key.to_string()), Value::Text(name.to_string())])
    }

    fn names(table: &Table) -> Vec<String> {
        table.scan().map(|(_, row)| row.get::<String>(1).unwrap()).collect()
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut table = customer_table();
        table.insert(id("joko"), row("joko", "Joko Susilo")).unwrap();
        assert_eq!(table.get(&id("joko")), Some(&row("joko", "Joko Susilo")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_rejects_duplicate_key_without_side_effects() {
        let mut table = customer_table();
        table.insert(id("joko"), row("joko", "Joko Susilo")).unwrap();
        let result = table.insert(id("joko"), row("joko", "Someone Else"));
        assert!(matches!(result, Err(Error::DuplicateKey { .. })));
        assert_eq!(names(&table), vec!["Joko Susilo"]);
    }

    #[test]
    fn insert_rejects_wrong_width() {
        let mut table = customer_table();
        let result = table.insert(id("joko"), Row(vec![Value::Text("joko".to_string())]));
        assert!(matches!(result, Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn scan_yields_insertion_order_and_skips_deleted_rows() {
        let mut table = customer_table();
        table.insert(id("a"), row("a", "Andi")).unwrap();
        table.insert(id("b"), row("b", "Budi")).unwrap();
        table.insert(id("c"), row("c", "Citra")).unwrap();
        table.delete(&id("b")).unwrap();
        assert_eq!(names(&table), vec!["Andi", "Citra"]);
        // Restartable.
        assert_eq!(names(&table), vec!["Andi", "Citra"]);
    }

    #[test]
    fn delete_missing_row_is_not_found() {
        let mut table = customer_table();
        assert!(matches!(table.delete(&id("ghost")), Err(Error::NotFound { .. })));
    }

    #[test]
    fn restore_puts_row_back_in_its_original_position() {
        let mut table = customer_table();
        table.insert(id("a"), row("a", "Andi")).unwrap();
        table.insert(id("b"), row("b", "Budi")).unwrap();
        table.insert(id("c"), row("c", "Citra")).unwrap();
        let (position, deleted) = table.delete(&id("b")).unwrap();
        table.restore(position, id("b"), deleted).unwrap();
        assert_eq!(names(&table), vec!["Andi", "Budi", "Citra"]);
        assert_eq!(table.position(&id("b")), Some(1));
    }

    #[test]
    fn delete_churn_keeps_storage_bounded() {
        let mut table = customer_table();
        table.insert(id("keep"), row("keep", "Andi")).unwrap();
        for i in 0..10_000 {
            let key = format!("k{}", i);
            table.insert(id(&key), row(&key, "Budi")).unwrap();
            table.delete(&id(&key)).unwrap();
        }
        assert_eq!(table.len(), 1);
        assert_eq!(table.slots.len(), 1);
        assert_eq!(names(&table), vec!["Andi"]);
    }

    #[test]
    fn restore_rejects_positions_never_handed_out() {
        let mut table = customer_table();
        table.insert(id("a"), row("a", "Andi")).unwrap();
        let result = table.restore(5, id("b"), row("b", "Budi"));
        assert!(matches!(result, Err(Error::DuplicateKey { .. })));
        assert!(!table.contains(&id("b")));
    }

    #[test]
    fn update_rekeys_the_index() {
        let mut table = customer_table();
        table.insert(id("a"), row("a", "Andi")).unwrap();
        table.insert(id("b"), row("b", "Budi")).unwrap();

        let previous = table.update(&id("a"), id("z"), row("z", "Zaki")).unwrap();
        assert_eq!(previous, row("a", "Andi"));
        assert!(!table.contains(&id("a")));
        assert_eq!(table.position(&id("z")), Some(0));

        let result = table.update(&id("z"), id("b"), row("b", "Clash"));
        assert!(matches!(result, Err(Error::DuplicateKey { .. })));
        assert_eq!(table.get(&id("z")), Some(&row("z", "Zaki")));
    }

    #[test]
    fn scan_where_filters_rows() {
        let mut table = customer_table();
        table.insert(id("a"), row("a", "Andi")).unwrap();
        table.insert(id("b"), row("b", "Budi")).unwrap();
        let matched: Vec<_> = table
            .scan_where(|row| row[1] == Value::Text("Budi".to_string()))
            .map(|(id, _)| id.clone())
            .collect();
        assert_eq!(matched, vec![id("b")]);
    }
}
