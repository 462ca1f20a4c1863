pub mod benchmarks;
pub mod upload;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/upload", post(upload::upload))
        .route("/api/benchmarks/{id}", get(benchmarks::get))
        .route("/api/benchmarks/{id}/config", get(benchmarks::config))
}
