//! Router assembly: common routes at the root, tables under `/api`, admin
//! under `/_admin`.

mod admin;
mod common;
mod entity;

pub use admin::admin_routes;
pub use common::common_routes;
pub use entity::entity_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", entity_routes(state.clone()))
        .nest("/_admin", admin_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
