//! Synthetic data: generator registry, row generation and seeding.

pub mod registry;
pub mod rows;
pub mod seed;

pub use rows::{generate, storable, ForeignKeyPools, Row};
pub use seed::{SeedOptions, SeedReport, Seeder};
