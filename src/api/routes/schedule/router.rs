//! Router for the schedule API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use http::{StatusCode, header};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, layout_engine};
use crate::schedule::demo_schedule;
use crate::session::GeneratedDocument;

type SharedState = Arc<RwLock<AppState>>;

fn document_response(document: &GeneratedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, document.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", document.filename()),
            ),
        ],
        document.bytes.clone(),
    )
        .into_response()
}

/// Get the schedule under review
async fn get_schedule(State(state): State<SharedState>) -> Json<public::Schedule> {
    Json(state.read().unwrap().session.schedule().clone())
}

/// Replace the course details and events with edited values
async fn replace_schedule(
    State(state): State<SharedState>,
    Json(update): Json<public::ScheduleUpdate>,
) -> Json<public::Schedule> {
    let mut state = state.write().unwrap();
    state.session.apply(update);
    Json(state.session.schedule().clone())
}

/// Drop the schedule and any generated document
async fn clear_schedule(State(state): State<SharedState>) -> StatusCode {
    state.write().unwrap().session.clear();
    StatusCode::NO_CONTENT
}

/// Load the bundled demo schedule
async fn load_demo(State(state): State<SharedState>) -> Json<public::Schedule> {
    let mut state = state.write().unwrap();
    state.session.load(demo_schedule());
    Json(state.session.schedule().clone())
}

/// Layout artifacts for the current schedule as structured data
async fn get_layout(State(state): State<SharedState>) -> Json<public::ScheduleLayout> {
    let state = state.read().unwrap();
    Json(state.engine().layout(state.session.schedule()))
}

/// Render the current schedule and keep it for download
async fn generate_document(
    State(state): State<SharedState>,
    Query(params): Query<public::DocumentQuery>,
) -> Result<Response, ApiError> {
    let format = params.format.unwrap_or_default();
    let mut guard = state.write().unwrap();
    let AppState {
        session,
        config,
        palette,
        today,
        ..
    } = &mut *guard;
    let engine = layout_engine(palette, config, *today);
    let document = session.generate(&engine, format)?;
    Ok(document_response(document))
}

/// Download the last generated document
async fn get_document(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let state = state.read().unwrap();
    let document = state
        .session
        .generated()
        .ok_or_else(|| ApiError::not_found("No document has been generated yet"))?;
    Ok(document_response(document))
}

/// Create the schedule router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/",
            axum::routing::get(get_schedule)
                .put(replace_schedule)
                .delete(clear_schedule),
        )
        .route("/demo", axum::routing::post(load_demo))
        .route("/layout", axum::routing::get(get_layout))
        .route(
            "/document",
            axum::routing::post(generate_document).get(get_document),
        )
}
