use crate::handlers::admin::{reseed, schema};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/reseed", post(reseed))
        .route("/schema", get(schema))
        .with_state(state)
}
