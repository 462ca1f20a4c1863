pub mod dashboard;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(dashboard::root))
        .route("/benchmarks/{id}", get(dashboard::show))
}
