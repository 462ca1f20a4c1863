use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use crate::error::AppError;
use crate::models::{RecordId, UploadResponse};
use crate::state::SharedState;
use crate::store::RecordFile;
use crate::upload::parser;

pub async fn upload(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Upload exceeds the maximum body size".to_string())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })?;

    // Everything is validated before the first write.
    let parts = parser::parse_multipart(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;
    let raw_report = parts
        .report
        .ok_or_else(|| AppError::BadRequest("Missing report file".to_string()))?;
    let report = parser::parse_report(&raw_report).map_err(AppError::BadRequest)?;

    let id = RecordId::generate();
    state.store.save_report(&id, &report).await?;
    match &parts.config {
        Some(archive) => state.store.save_config(&id, archive).await?,
        None => state.store.clear_latest(RecordFile::Config).await?,
    }

    tracing::info!(
        "Stored benchmark {id} (config: {})",
        if parts.config.is_some() { "yes" } else { "no" }
    );

    let link = state.config.record_link(id.as_str());
    Ok(Json(UploadResponse {
        id: id.clone(),
        uuid: id,
        link,
    }))
}
