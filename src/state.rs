//! Shared application state for all routes. The schema never changes after
//! startup; re-seeding only touches rows.

use crate::config::SchemaDescriptor;
use crate::generator::{SeedOptions, Seeder};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub schema: Arc<SchemaDescriptor>,
    pub seeder: Arc<Seeder>,
}

impl AppState {
    pub fn new(pool: SqlitePool, schema: SchemaDescriptor, options: SeedOptions) -> Self {
        let schema = Arc::new(schema);
        let seeder = Arc::new(Seeder::new(pool.clone(), schema.clone(), options));
        AppState { pool, schema, seeder }
    }
}
