//! Mock server: load the schema config, rebuild and seed the store, serve.
//!
//! Run from repo root: `cargo run -p mock_server`
//!
//! Environment (a `.env` file is read if present):
//! - `CONFIG_PATH`   schema config file, default `mock.config.json`
//! - `DATABASE_URL`  SQLite URL, default `sqlite://mock.db?mode=rwc`
//! - `BIND_ADDR`     listen address, default `127.0.0.1:3000`
//! - `MOCK_RNG_SEED` optional u64 for reproducible data

use mockbase::{compile, connect, load_from_path, resolve, router, AppState, SeedOptions};
use tokio::net::TcpListener;

const DEFAULT_CONFIG_PATH: &str = "mock.config.json";
const DEFAULT_DATABASE_URL: &str = "sqlite://mock.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mockbase=info,mock_server=info")),
        )
        .init();

    let config_path = env_or("CONFIG_PATH", DEFAULT_CONFIG_PATH);
    let database_url = env_or("DATABASE_URL", DEFAULT_DATABASE_URL);
    let bind_addr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR);
    let rng_seed = match std::env::var("MOCK_RNG_SEED") {
        Ok(s) => Some(s.trim().parse::<u64>().map_err(|e| format!("MOCK_RNG_SEED: {}", e))?),
        Err(_) => None,
    };

    let config = load_from_path(&config_path).await?;
    let schema = resolve(&config)?;
    tracing::info!(path = %config_path, tables = schema.tables.len(), "config loaded");

    let pool = connect(&database_url).await?;
    compile(&pool, &schema).await?;

    let state = AppState::new(pool, schema, SeedOptions { rng_seed });
    let report = state.seeder.seed_all().await?;
    let rows: u64 = report.iter().map(|r| r.rows).sum();
    tracing::info!(rows, "initial seed complete");

    let app = router(state);
    let listener = TcpListener::bind(&bind_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!("mock server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
