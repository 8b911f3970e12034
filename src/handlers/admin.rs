//! Admin handlers: re-seed and schema summary.

use crate::config::TableSummary;
use crate::error::AppError;
use crate::response::{success_one, SuccessOne};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{Map, Value};

/// Clear every table and generate fresh rows. 409 while another run is active.
pub async fn reseed(State(state): State<AppState>) -> Result<Json<SuccessOne<Map<String, Value>>>, AppError> {
    let report = state.seeder.reseed().await?;
    let counts: Map<String, Value> = report
        .into_iter()
        .map(|r| (r.table, Value::from(r.rows)))
        .collect();
    Ok(Json(success_one(counts)))
}

pub async fn schema(State(state): State<AppState>) -> Json<SuccessOne<Vec<TableSummary>>> {
    Json(success_one(state.schema.summary()))
}
