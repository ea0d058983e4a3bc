//! Paste HTTP handlers.

use crate::{error::HttpError, models::paste::*, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

const CREATED_MESSAGE: &str = "Your code has been saved successfully";

/// Join the public base URL and a short code with exactly one slash.
pub fn share_url(public_url: &str, short_code: &str) -> String {
    format!("{}/{}", public_url.trim_end_matches('/'), short_code)
}

/// Create a new paste.
///
/// # Returns
/// `201` with the share URL embedding the allocated short code.
///
/// # Errors
/// Returns `500` when allocation is exhausted or persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    Json(req): Json<CreatePasteRequest>,
) -> Result<(StatusCode, Json<CreatePasteResponse>), HttpError> {
    let record = state.store.create(req.code)?;
    tracing::info!("Created paste: {}", record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(CreatePasteResponse {
            message: CREATED_MESSAGE.to_string(),
            url: share_url(&state.config.public_url, &record.short_code),
        }),
    ))
}

/// Fetch paste content by short code.
///
/// # Returns
/// The stored content, unchanged.
///
/// # Errors
/// `404` for unknown codes, `410` for expired ones, `500` on storage failure.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<PasteResponse>, HttpError> {
    tracing::info!("Fetching url: {}", short_code);
    let code = state.store.get(&short_code)?;
    Ok(Json(PasteResponse { code }))
}
