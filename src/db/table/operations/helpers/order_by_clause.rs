use std::cmp::Ordering;

use crate::db::table::core::row::Row;
use crate::db::table::core::schema::TableSchema;
use crate::error::Result;
use crate::interpreter::ast::{OrderByClause, OrderByDirection};

/// Resolved sort keys: column position and direction.
pub fn sort_keys(
    schema: &TableSchema,
    order_by: &OrderByClause,
) -> Result<Vec<(usize, OrderByDirection)>> {
    order_by
        .columns
        .iter()
        .zip(&order_by.directions)
        .map(|(column, direction)| Ok((schema.get_index_of_column(column)?, *direction)))
        .collect()
}

/// Stable sort, so rows equal on every key keep insertion order.
pub fn apply_order_by(rows: &mut [&Row], keys: &[(usize, OrderByDirection)]) {
    rows.sort_by(|a, b| {
        for (column, direction) in keys {
            let ordering = a[*column].sort_cmp(&b[*column]);
            let ordering = match direction {
                OrderByDirection::Asc => ordering,
                OrderByDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}
