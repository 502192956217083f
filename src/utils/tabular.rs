use crate::models::report::TabularResult;
use serde_json::Value;
use sqlx::sqlite::{SqliteColumn, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Convert dynamically typed rows into a [`TabularResult`].
///
/// Column names come from the prepared statement, so a query without
/// matching rows still reports its header.
pub fn rows_to_table(columns: &[SqliteColumn], rows: &[SqliteRow]) -> TabularResult {
    let columns = columns.iter().map(|c| c.name().to_string()).collect();

    let rows = rows
        .iter()
        .map(|row| (0..row.columns().len()).map(|i| cell_value(row, i)).collect())
        .collect();

    TabularResult { columns, rows }
}

// SQLite values are typed per cell, not per column
fn cell_value(row: &SqliteRow, index: usize) -> Value {
    let raw = match row.try_get_raw(index) {
        Ok(raw) => raw,
        Err(_) => return Value::Null,
    };
    if raw.is_null() {
        return Value::Null;
    }
    let type_name = raw.type_info().name().to_string();

    match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get::<i64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "REAL" => row
            .try_get::<f64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(|bytes| Value::from(hex::encode(bytes)))
            .unwrap_or(Value::Null),
        _ => row
            .try_get::<String, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
    }
}

/// Render a cell for text output; strings lose their JSON quotes.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
