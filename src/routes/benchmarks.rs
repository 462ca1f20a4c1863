use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::models::RecordId;
use crate::state::SharedState;

/// Prefix of the attachment name offered for configuration downloads.
const CONFIG_DOWNLOAD_PREFIX: &str = "pma_config_";

fn record_id(raw: &str, what: &str) -> Result<RecordId, AppError> {
    RecordId::parse(raw).ok_or_else(|| AppError::NotFound(format!("{what} not found")))
}

/// Stored report, with `has_config: true` added to object reports that
/// have an archive next to them.
pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = record_id(&id, "Results")?;

    let Some(mut report) = state.store.load_report(&id).await? else {
        tracing::debug!("No results stored for {id}");
        return Err(AppError::NotFound("Results not found".to_string()));
    };

    if let Some(fields) = report.as_object_mut() {
        if state.store.has_config(&id).await? {
            fields.insert("has_config".to_string(), Value::Bool(true));
        }
    }

    Ok(Json(report))
}

pub async fn config(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = record_id(&id, "Configuration")?;

    let archive = state.store.load_config(&id).await?.ok_or_else(|| {
        tracing::debug!("No configuration stored for {id}");
        AppError::NotFound("Configuration not found".to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CONFIG_DOWNLOAD_PREFIX}{id}.zip\""),
            ),
        ],
        archive,
    ))
}
