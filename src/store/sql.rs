//! Multi-row statement generation.
use tokio_postgres::types::ToSql;

use crate::constants::MAX_BIND_PARAMS;

/// A row of one of the store's tables.
pub trait Record {
    /// Qualified table name
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Bind values, in `COLUMNS` order.
    fn params(&self) -> Vec<&(dyn ToSql + Sync)>;
}

/// Builds a multi-row insert statement with positional placeholders.
///
/// * `table` - qualified table name
/// * `columns` - column names, in bind order
/// * `row_count` - number of value tuples
pub fn build_insert(table: &str, columns: &[&str], row_count: usize) -> String {
    debug_assert!(row_count > 0, "empty batches are not inserted");
    debug_assert!(!columns.is_empty());
    let n = columns.len();
    let values = (0..row_count)
        .map(|r| {
            let placeholders = (1..=n)
                .map(|c| format!("${}", r * n + c))
                .collect::<Vec<String>>()
                .join(", ");
            format!("({placeholders})")
        })
        .collect::<Vec<String>>()
        .join(", ");
    format!(
        "insert into {table} ({}) values {values};",
        columns.join(", ")
    )
}

/// Deletes all rows of a given slot.
pub fn build_delete(table: &str) -> String {
    format!("delete from {table} where slot = $1;")
}

/// Concatenates bind values of `rows`, row by row.
pub fn flatten<R: Record>(rows: &[R]) -> Vec<&(dyn ToSql + Sync)> {
    rows.iter().flat_map(|r| r.params()).collect()
}

/// Maximum number of rows per statement for a table with `column_count` columns.
pub fn rows_per_statement(column_count: usize) -> usize {
    (MAX_BIND_PARAMS / column_count.max(1)).max(1)
}
