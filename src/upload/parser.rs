use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::Value;

/// Form field carrying the JSON report.
pub const REPORT_FIELD: &str = "file";
/// Form field carrying the optional configuration archive.
pub const CONFIG_FIELD: &str = "config_file";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The file parts of an upload, read fully into memory.
#[derive(Debug, Default)]
pub struct UploadParts {
    pub report: Option<Bytes>,
    pub config: Option<Bytes>,
}

/// Parse a multipart upload using multer. Unknown fields are skipped and
/// empty parts count as absent, which is what browsers send for an
/// unselected file input.
pub async fn parse_multipart(headers: &HeaderMap, body: Bytes) -> Result<UploadParts, String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Expected a multipart/form-data upload with a boundary".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = UploadParts::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let slot = match field.name() {
            Some(REPORT_FIELD) => &mut parts.report,
            Some(CONFIG_FIELD) => &mut parts.config,
            _ => continue,
        };
        let contents = field
            .bytes()
            .await
            .map_err(|e| format!("Field read error: {e}"))?;
        if !contents.is_empty() {
            *slot = Some(contents);
        }
    }

    Ok(parts)
}

/// Parse the report part. Any well-formed JSON document is accepted, with or
/// without a leading UTF-8 byte order mark.
pub fn parse_report(raw: &[u8]) -> Result<Value, String> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    serde_json::from_slice(raw).map_err(|e| {
        tracing::debug!("Rejected report: {e}");
        "Invalid JSON report file".to_string()
    })
}
