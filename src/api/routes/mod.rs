//! API routes module

pub mod extract;
pub mod schedule;

use std::sync::{Arc, RwLock};

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Syllabus extraction
        .nest("/extract", extract::router())
        // Schedule review, layout and document generation
        .nest("/schedule", schedule::router())
}
