use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect};

use crate::error::AppError;
use crate::models::RecordId;
use crate::state::SharedState;

pub const DASHBOARD_TEMPLATE: &str = "dashboard.html";

pub async fn root() -> impl IntoResponse {
    Redirect::to(&format!("/benchmarks/{}", RecordId::LATEST))
}

/// Serve the dashboard page. The page is the same for every id; its script
/// reads the id from the URL and fetches the data API, so unknown ids are
/// reported client-side.
pub async fn show(
    State(state): State<SharedState>,
    Path(_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let path = state.config.templates_dir.join(DASHBOARD_TEMPLATE);

    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::Misconfigured(
            "Dashboard template not found".to_string(),
        )),
        Err(e) => Err(AppError::Io(e)),
    }
}
