//! Router for the extract API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::extract::{extract_schedule, is_supported_document};

type SharedState = Arc<RwLock<AppState>>;

fn decode_payload(encoded: &str) -> Result<Vec<u8>, ApiError> {
    let encoded = encoded.trim();
    // Accept `data:application/pdf;base64,...` as sent by file readers
    let encoded = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let document = STANDARD
        .decode(encoded)
        .map_err(|e| ApiError::bad_request(format!("Invalid base64 payload: {}", e)))?;
    if !is_supported_document(&document) {
        return Err(ApiError::bad_request("Document is neither a PDF nor UTF-8 text"));
    }
    Ok(document)
}

/// Extract a schedule from an uploaded syllabus and make it the session's
/// current schedule. The session is left alone if extraction fails.
async fn extract(
    State(state): State<SharedState>,
    Json(payload): Json<public::ExtractRequest>,
) -> Result<Json<public::ExtractResponse>, ApiError> {
    let Some(encoded) = payload.base64.filter(|b| !b.trim().is_empty()) else {
        return Err(ApiError::bad_request("Missing PDF payload"));
    };
    let document = decode_payload(&encoded)?;

    let extractor = Arc::clone(&state.read().unwrap().extractor);
    let schedule = extract_schedule(extractor.as_ref(), &document).await?;

    state.write().unwrap().session.load(schedule.clone());
    Ok(Json(public::ExtractResponse { data: schedule }))
}

/// Create the extract router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(extract))
}
