//! Route handlers.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::application::index::{build_listing, write_listing};
use crate::application::SubmitInput;

use super::error::ApiError;
use super::state::AppState;

/// Body of a successful `POST /convert/`
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub message: String,
    pub output_path: String,
}

/// Body of a successful `POST /index`
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub index_path: String,
}

/// Convert an uploaded audio file (`POST /convert/`).
///
/// Multipart fields: `file` (binary, with a filename) and `project` (text).
/// Other fields are ignored.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let mut multipart = multipart?;
    let mut input = SubmitInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                input.original_filename = field.file_name().map(str::to_owned);
                input.file_bytes = Some(field.bytes().await?.to_vec());
            }
            Some("project") => {
                input.project_label = Some(field.text().await?);
            }
            other => {
                debug!(field = ?other, "ignoring unknown multipart field");
            }
        }
    }

    let source = input.original_filename.clone().unwrap_or_default();
    let output = state.submit.execute(input).await?;

    Ok(Json(ConvertResponse {
        message: format!("Converted {}", source),
        output_path: output.output_path.to_string(),
    }))
}

/// Render the current listing as Markdown (`GET /index`)
pub async fn show_index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let target = state.submit.settings().target;
    let document = build_listing(state.submit.library(), target).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        document.to_markdown(),
    ))
}

/// Rebuild and write the listing file (`POST /index`)
pub async fn regenerate_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndexResponse>, ApiError> {
    let settings = state.submit.settings();
    let output =
        write_listing(state.submit.library(), settings.target, &settings.index_file).await?;
    Ok(Json(IndexResponse {
        message: format!(
            "Indexed {} files in {} projects",
            output.document.file_count(),
            output.document.projects().len()
        ),
        index_path: output.index_path.display().to_string(),
    }))
}

/// Liveness check (`GET /health`)
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
