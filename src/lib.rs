//! mockbase: schema-driven mock REST server on SQLite.
//!
//! A JSON schema of tables and fields is compiled into SQLite tables, filled
//! with generated rows, and served through generic CRUD routes with
//! filtering, pagination and relation embedding.

pub mod compiler;
pub mod config;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod handlers;
pub mod query;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use compiler::{compile, create_table_sql};
pub use config::{load_from_path, parse_config, resolve, MockConfig, SchemaDescriptor, TableDescriptor};
pub use error::{AppError, ConfigError};
pub use generator::{SeedOptions, SeedReport, Seeder};
pub use routes::router;
pub use service::CrudService;
pub use state::AppState;
pub use store::connect;
