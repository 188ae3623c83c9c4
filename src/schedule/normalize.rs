//! Coerces loosely shaped records (usually model output or edits from the
//! review table) into well formed `Event`s and `Schedule`s.

use anyhow::{Result, bail};
use serde_json::Value;

use super::dates::parse_date;
use super::models::{Category, Event, Schedule};

pub const UNTITLED_EVENT: &str = "Untitled event";

/// Normalize one raw record found at position `idx`. Unknown fields are
/// dropped and missing ones defaulted; this never fails.
pub fn normalize_event(record: &Value, idx: usize) -> Event {
    let field = |name: &str| record.get(name).unwrap_or(&Value::Null);

    Event {
        id: coerce_id(field("id")).unwrap_or(idx as u64 + 1),
        category: coerce_text(field("category"))
            .map(|c| Category::from_lenient(&c))
            .unwrap_or_default(),
        title: coerce_text(field("title")).unwrap_or_else(|| UNTITLED_EVENT.to_string()),
        date: coerce_text(field("date")).and_then(|d| parse_date(&d)),
        recurring: coerce_bool(field("recurring")),
        recurrence_rule: coerce_text(field("recurrence_rule")),
        time_start: coerce_text(field("time_start")),
        time_end: coerce_text(field("time_end")),
        location: coerce_text(field("location")),
        notes: coerce_text(field("notes")),
    }
}

pub fn normalize_events(records: &[Value]) -> Vec<Event> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| normalize_event(record, idx))
        .collect()
}

/// Build a `Schedule` from an extraction-shaped object. The only hard
/// requirement is an `events` array.
pub fn normalize_schedule(value: &Value) -> Result<Schedule> {
    let Some(records) = value.get("events").and_then(Value::as_array) else {
        bail!("response JSON does not include an events array");
    };
    let field = |name: &str| value.get(name).unwrap_or(&Value::Null);

    Ok(Schedule {
        course_name: coerce_text(field("course_name")),
        instructor: coerce_text(field("instructor")),
        semester: coerce_text(field("semester")),
        semester_start: coerce_bound(field("semester_start"), "semester_start"),
        semester_end: coerce_bound(field("semester_end"), "semester_end"),
        events: normalize_events(records),
    })
}

fn coerce_bound(value: &Value, name: &str) -> Option<chrono::NaiveDate> {
    let raw = coerce_text(value)?;
    let parsed = parse_date(&raw);
    if parsed.is_none() {
        tracing::warn!("Ignoring unparseable {}: {}", name, raw);
    }
    parsed
}

fn coerce_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "" | "false" | "0" | "no" | "off" | "none" | "null"
        ),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() || text == "None" || text == "null" {
        None
    } else {
        Some(text)
    }
}
