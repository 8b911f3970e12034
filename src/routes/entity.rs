//! Entity CRUD routes. The table name is a path parameter; handlers resolve
//! it against the schema, so no per-table routes are registered.

use crate::handlers::entity::{create, delete, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:table", get(list).post(create))
        .route("/:table/:id", get(read).put(update).patch(update).delete(delete))
        .with_state(state)
}
