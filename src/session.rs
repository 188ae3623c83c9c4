//! The working state of one editing session: the schedule being reviewed
//! and the last document generated from it. Layout itself stays
//! stateless; the session only decides what gets laid out and keeps the
//! result around for download.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::layout::LayoutEngine;
use crate::render::{Format, render_document};
use crate::schedule::{Schedule, normalize_events, parse_date};

/// Course metadata as typed into the review form. Blank fields clear the
/// stored value; dates that don't parse are logged and dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub course_name: Option<String>,
    pub instructor: Option<String>,
    pub semester: Option<String>,
    pub semester_start: Option<String>,
    pub semester_end: Option<String>,
}

/// A full replacement of the reviewed schedule: details plus the edited
/// event rows in display order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScheduleUpdate {
    #[serde(flatten)]
    pub details: CourseDetails,
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub format: Format,
    pub bytes: Vec<u8>,
}

impl GeneratedDocument {
    pub fn filename(&self) -> String {
        format!("semester_schedule.{}", self.format.extension())
    }

    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bound(value: Option<String>, name: &str) -> Option<NaiveDate> {
    let raw = non_blank(value)?;
    let parsed = parse_date(&raw);
    if parsed.is_none() {
        tracing::warn!("Ignoring unparseable {}: {}", name, raw);
    }
    parsed
}

#[derive(Debug, Default)]
pub struct Session {
    schedule: Schedule,
    generated: Option<GeneratedDocument>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Swap in a freshly extracted schedule. Anything generated from the
    /// previous one is discarded.
    pub fn load(&mut self, schedule: Schedule) {
        tracing::debug!("Loading schedule with {} events", schedule.events.len());
        self.schedule = schedule;
        self.generated = None;
    }

    pub fn update_details(&mut self, details: CourseDetails) {
        self.schedule.course_name = non_blank(details.course_name);
        self.schedule.instructor = non_blank(details.instructor);
        self.schedule.semester = non_blank(details.semester);
        self.schedule.semester_start = parse_bound(details.semester_start, "semester_start");
        self.schedule.semester_end = parse_bound(details.semester_end, "semester_end");
    }

    /// Replace the event list with edited rows, renumbering missing ids by
    /// position.
    pub fn replace_events(&mut self, records: &[Value]) {
        self.schedule.events = normalize_events(records);
    }

    pub fn apply(&mut self, update: ScheduleUpdate) {
        self.update_details(update.details);
        self.replace_events(&update.events);
    }

    /// Render the current schedule and keep the result. On failure the
    /// previously generated document is left as it was.
    pub fn generate(
        &mut self,
        engine: &LayoutEngine,
        format: Format,
    ) -> Result<&GeneratedDocument> {
        let document = engine.assemble(&self.schedule);
        let bytes = render_document(&document, format)
            .with_context(|| format!("Failed to render {} document", format))?;
        tracing::info!(
            "Generated {} document with {} pages ({} bytes)",
            format,
            document.page_count(),
            bytes.len()
        );
        Ok(self.generated.insert(GeneratedDocument { format, bytes }))
    }

    pub fn generated(&self) -> Option<&GeneratedDocument> {
        self.generated.as_ref()
    }

    pub fn clear(&mut self) {
        self.schedule = Schedule::default();
        self.generated = None;
    }
}
