//! Liveness and readiness of the mock: process up, tables present and seeded.

use crate::sql::quoted;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Map, Value};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Row count per declared table. Any failed count means the store is not
/// usable and the mock reports 503 with the failing table.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut rows = Map::new();
    for table in &state.schema.tables {
        let sql = format!("SELECT COUNT(*) FROM {}", quoted(&table.name));
        match sqlx::query_scalar::<_, i64>(&sql).fetch_one(&state.pool).await {
            Ok(n) => {
                rows.insert(table.name.clone(), Value::from(n));
            }
            Err(e) => {
                tracing::warn!(table = %table.name, error = %e, "readiness count failed");
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "status": "unavailable", "table": table.name })),
                );
            }
        }
    }
    (StatusCode::OK, Json(json!({ "status": "ok", "rows": rows })))
}

async fn version() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
