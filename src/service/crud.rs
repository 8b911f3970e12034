//! Generic CRUD execution against SQLite.

use crate::config::TableDescriptor;
use crate::error::AppError;
use crate::query::{FilterSet, Include, Pagination};
use crate::service::present::present_row;
use crate::sql::{count, delete, insert, select_by_id, select_list, update, QueryBuf};
use crate::store;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

pub struct CrudService;

impl CrudService {
    /// One page of rows matching `filters`, plus the total number of
    /// matching rows ignoring pagination.
    pub async fn list(
        pool: &SqlitePool,
        table: &TableDescriptor,
        filters: &FilterSet,
        pagination: &Pagination,
        includes: &[Include<'_>],
    ) -> Result<(Vec<Value>, u64), AppError> {
        let q = count(table, filters);
        let total: i64 = store::query(&q.sql, &q.params)
            .fetch_one(pool)
            .await
            .map(|row| store::cell_to_value(&row, 0).as_i64().unwrap_or(0))?;

        let q = select_list(table, filters, pagination, includes);
        let rows = Self::query_many(pool, &q).await?;
        let rows = rows
            .into_iter()
            .map(|r| present_row(table, includes, r))
            .collect();
        Ok((rows, total.max(0) as u64))
    }

    /// Fetch one row by key with optional embedded relations.
    pub async fn read(
        pool: &SqlitePool,
        table: &TableDescriptor,
        id: &Value,
        includes: &[Include<'_>],
    ) -> Result<Option<Value>, AppError> {
        let q = select_by_id(table, id, includes);
        let row = Self::query_optional(pool, &q).await?;
        Ok(row.map(|r| present_row(table, includes, r)))
    }

    /// Insert one row from the declared fields present in `body`.
    pub async fn create(
        pool: &SqlitePool,
        table: &TableDescriptor,
        body: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let q = insert(table, body);
        let row = Self::query_optional(pool, &q)
            .await?
            .ok_or(AppError::Store(sqlx::Error::RowNotFound))?;
        Ok(present_row(table, &[], row))
    }

    /// Update declared non-key fields present in `body`. `None` when no row
    /// has this key.
    pub async fn update(
        pool: &SqlitePool,
        table: &TableDescriptor,
        id: &Value,
        body: &Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(table, id, body);
        let row = Self::query_optional(pool, &q).await?;
        Ok(row.map(|r| present_row(table, &[], r)))
    }

    /// Delete by key. Returns whether a row was removed.
    pub async fn delete(pool: &SqlitePool, table: &TableDescriptor, id: &Value) -> Result<bool, AppError> {
        let q = delete(table, id);
        Ok(Self::query_optional(pool, &q).await?.is_some())
    }

    async fn query_optional(pool: &SqlitePool, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        let row = store::query(&q.sql, &q.params).fetch_optional(pool).await?;
        Ok(row.map(|r| store::row_to_json(&r)))
    }

    async fn query_many(pool: &SqlitePool, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        let rows = store::query(&q.sql, &q.params).fetch_all(pool).await?;
        Ok(rows.iter().map(store::row_to_json).collect())
    }
}
