//! SQLite pool setup, statement binding and row decoding.

use crate::error::AppError;
use crate::sql::SqliteBindValue;
use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::str::FromStr;

/// Open a pool for `database_url` (e.g. `sqlite://mock.db?mode=rwc` or
/// `sqlite::memory:`). Foreign-key enforcement is on for every connection.
///
/// An in-memory database lives only as long as its connection, so those
/// pools hold exactly one connection that never expires.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Prepare `sql` with every param bound in order. Logs the statement at debug.
pub fn query<'q>(sql: &'q str, params: &[Value]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    tracing::debug!(sql = %sql, params = ?params, "query");
    let mut query = sqlx::query(sql);
    for p in params {
        query = query.bind(SqliteBindValue::from_json(p));
    }
    query
}

pub fn row_to_json(row: &SqliteRow) -> Value {
    let mut map = Map::new();
    for col in row.columns() {
        map.insert(col.name().to_string(), cell_to_value(row, col.ordinal()));
    }
    Value::Object(map)
}

/// Decode one cell by its runtime storage class. Expression columns
/// (subqueries, aggregates) carry no declared type, so the value's own
/// class is what counts.
pub fn cell_to_value(row: &SqliteRow, index: usize) -> Value {
    let class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };
    match class.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get_unchecked::<i64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "REAL" | "NUMERIC" => row
            .try_get_unchecked::<f64, _>(index)
            .map(Value::from)
            .unwrap_or(Value::Null),
        _ => row
            .try_get_unchecked::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}
