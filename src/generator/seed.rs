//! Populating and clearing the store from the schema's seed counts.

use crate::config::{SchemaDescriptor, TableDescriptor};
use crate::error::AppError;
use crate::generator::rows::{self, ForeignKeyPools};
use crate::sql;
use crate::store;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Copy, Debug, Default)]
pub struct SeedOptions {
    /// Fixed RNG seed for reproducible data. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub table: String,
    pub rows: u64,
}

/// Seeds tables in declaration order. Only one seed or re-seed runs at a time.
pub struct Seeder {
    pool: SqlitePool,
    schema: Arc<SchemaDescriptor>,
    options: SeedOptions,
    lock: Mutex<()>,
}

impl Seeder {
    pub fn new(pool: SqlitePool, schema: Arc<SchemaDescriptor>, options: SeedOptions) -> Self {
        Seeder {
            pool,
            schema,
            options,
            lock: Mutex::new(()),
        }
    }

    fn rng(&self) -> StdRng {
        match self.options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Seed every table, waiting for any run already in progress.
    pub async fn seed_all(&self) -> Result<Vec<SeedReport>, AppError> {
        let _guard = self.lock.lock().await;
        self.run().await
    }

    /// Clear then seed again. A trigger while another run holds the lock is
    /// rejected. Not atomic across tables: a failure leaves earlier tables
    /// seeded and later ones empty.
    pub async fn reseed(&self) -> Result<Vec<SeedReport>, AppError> {
        let _guard = self
            .lock
            .try_lock()
            .map_err(|_| AppError::Conflict("re-seed already in progress".into()))?;
        self.clear().await;
        self.run().await
    }

    async fn run(&self) -> Result<Vec<SeedReport>, AppError> {
        let mut rng = self.rng();
        let mut report = Vec::with_capacity(self.schema.tables.len());
        for (pos, table) in self.schema.tables.iter().enumerate() {
            for (field, target, _) in table.foreign_keys() {
                if self.schema.position(target).is_some_and(|p| p >= pos) {
                    tracing::warn!(
                        table = %table.name,
                        field = %field.name,
                        target = %target,
                        "foreign key target is seeded later; values will be null"
                    );
                }
            }
            let rows = self.seed_table(table, &mut rng).await?;
            tracing::info!(table = %table.name, rows, "seeded");
            report.push(SeedReport {
                table: table.name.clone(),
                rows,
            });
        }
        Ok(report)
    }

    /// Generate and insert `table.seed` rows in one transaction. Foreign keys
    /// draw from rows already committed in their target tables.
    pub async fn seed_table(&self, table: &TableDescriptor, rng: &mut StdRng) -> Result<u64, AppError> {
        if table.seed == 0 {
            return Ok(0);
        }
        let pools = self.foreign_key_pools(table).await?;
        let rows = rows::generate(table, table.seed, &pools, rng);

        let mut tx = self.pool.begin().await?;
        for row in &rows {
            let q = sql::insert(table, row);
            store::query(&q.sql, &q.params).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(rows.len() as u64)
    }

    async fn foreign_key_pools(&self, table: &TableDescriptor) -> Result<ForeignKeyPools, AppError> {
        let mut pools = ForeignKeyPools::new();
        for (field, target_table, target_column) in table.foreign_keys() {
            let Some(target) = self.schema.table(target_table) else {
                continue;
            };
            let q = sql::select_column_values(target, target_column);
            let found = store::query(&q.sql, &q.params).fetch_all(&self.pool).await?;
            let values = found.iter().map(|r| store::cell_to_value(r, 0)).collect();
            pools.insert(field.name.clone(), values);
        }
        Ok(pools)
    }

    /// Delete all rows and reset key counters. Errors are logged and
    /// skipped, so clearing twice is the same as clearing once.
    pub async fn clear(&self) {
        for table in &self.schema.tables {
            let q = sql::delete_all(table);
            if let Err(e) = store::query(&q.sql, &q.params).execute(&self.pool).await {
                tracing::warn!(table = %table.name, error = %e, "clear failed");
            }
            let reset = store::query(
                "DELETE FROM sqlite_sequence WHERE name = ?1",
                &[serde_json::Value::String(table.name.clone())],
            )
            .execute(&self.pool)
            .await;
            if let Err(e) = reset {
                tracing::debug!(table = %table.name, error = %e, "key counter not reset");
            }
        }
    }
}
