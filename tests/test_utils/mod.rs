//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body};
use chrono::NaiveDate;
use serde_json::{Value, json};

use syllabus::api::{AppState, SharedExtractor, app};
use syllabus::core::AppConfig;
use syllabus::extract::Extractor;

/// Returns a canned extraction result, or fails with the given message.
pub struct StubExtractor(pub Result<Value, String>);

#[async_trait]
impl Extractor for StubExtractor {
    async fn extract(&self, _document: &[u8]) -> Result<Value> {
        self.0.clone().map_err(|e| anyhow!(e))
    }
}

pub fn sample_extraction() -> Value {
    json!({
        "course_name": "BIO 101",
        "instructor": "Dr. Rivera",
        "semester": "Fall 2025",
        "semester_start": "2025-09-02",
        "semester_end": "2025-10-31",
        "events": [
            {"category": "class", "title": "Lecture", "recurring": true,
             "recurrence_rule": "BYDAY=TU,TH", "time_start": "09:00", "time_end": "10:15",
             "location": "Hall A"},
            {"category": "exam", "title": "Midterm", "date": "2025-10-14",
             "time_start": "09:00", "time_end": "10:15"},
            {"category": "assignment", "title": "Lab report", "date": "2025-09-26",
             "time_start": "23:59"}
        ]
    })
}

/// The date undated schedules anchor to in tests.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// Creates a test application router backed by the given extractor.
pub fn test_app_with(extractor: SharedExtractor) -> Router {
    let config = AppConfig::default();
    let mut app_state = AppState::with_extractor(config, extractor);
    app_state.today = Some(test_today());
    app(Arc::new(RwLock::new(app_state)))
}

/// Creates a test application router whose extractor returns
/// `sample_extraction`.
pub fn test_app() -> Router {
    test_app_with(Arc::new(StubExtractor(Ok(sample_extraction()))))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_to_json(body: Body) -> Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
