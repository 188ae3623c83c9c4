//! Works out which weekdays a recurring event falls on.
//!
//! Two strategies are available behind `WeekdayDetector`:
//!
//! - `TextualDetector` scans the recurrence rule, notes and title for
//!   weekday words ("Monday", "Tue", "TH", ...) and then merges in any
//!   `BYDAY=` list. Forgiving, but a title like "Monday deadline" will
//!   tag a Monday.
//! - `StructuredDetector` only trusts a `BYDAY=` list in the recurrence
//!   rule.
//!
//! Both fall back to the weekday of the event's date when nothing else
//! matches, and report where the answer came from so callers can tell a
//! declared schedule from a guessed one.

use std::{collections::HashSet, str::FromStr, sync::LazyLock};

use anyhow::anyhow;
use chrono::{Datelike, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schedule::Event;

/// Monday-first column labels.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

// Scan order matters: two letter codes first, then full names, then three
// letter abbreviations.
const WEEKDAY_TOKENS: [(&str, Weekday); 21] = [
    ("MO", Weekday::Mon),
    ("TU", Weekday::Tue),
    ("WE", Weekday::Wed),
    ("TH", Weekday::Thu),
    ("FR", Weekday::Fri),
    ("SA", Weekday::Sat),
    ("SU", Weekday::Sun),
    ("MONDAY", Weekday::Mon),
    ("TUESDAY", Weekday::Tue),
    ("WEDNESDAY", Weekday::Wed),
    ("THURSDAY", Weekday::Thu),
    ("FRIDAY", Weekday::Fri),
    ("SATURDAY", Weekday::Sat),
    ("SUNDAY", Weekday::Sun),
    ("MON", Weekday::Mon),
    ("TUE", Weekday::Tue),
    ("WED", Weekday::Wed),
    ("THU", Weekday::Thu),
    ("FRI", Weekday::Fri),
    ("SAT", Weekday::Sat),
    ("SUN", Weekday::Sun),
];

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = WEEKDAY_TOKENS
        .iter()
        .map(|(token, _)| *token)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternatives)).expect("weekday token pattern is valid")
});

static BYDAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"BYDAY=([A-Z,]+)").expect("BYDAY pattern is valid"));

pub fn weekday_label(day: Weekday) -> &'static str {
    WEEKDAY_LABELS[day.num_days_from_monday() as usize]
}

fn lookup_token(token: &str) -> Option<Weekday> {
    WEEKDAY_TOKENS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, day)| *day)
}

/// Weekdays listed in the first `BYDAY=` clause of upper-cased text.
fn byday_weekdays(text: &str) -> Vec<Weekday> {
    let Some(captures) = BYDAY_PATTERN.captures(text) else {
        return vec![];
    };
    let mut days = vec![];
    for token in captures[1].split(',') {
        if let Some(day) = lookup_token(token)
            && !days.contains(&day)
        {
            days.push(day);
        }
    }
    days
}

/// Where a weekday answer came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdaySource {
    /// A machine readable `BYDAY=` rule.
    Declared,
    /// Weekday words found in free text.
    Inferred,
    /// The weekday of the event's own date.
    EventDate,
    /// Nothing could be worked out.
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetectedWeekdays {
    pub days: Vec<Weekday>,
    pub source: WeekdaySource,
}

impl DetectedWeekdays {
    pub fn labels(&self) -> Vec<&'static str> {
        self.days.iter().map(|d| weekday_label(*d)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn or_event_date(self, event: &Event) -> Self {
        if !self.days.is_empty() {
            return self;
        }
        match event.date {
            Some(date) => Self {
                days: vec![date.weekday()],
                source: WeekdaySource::EventDate,
            },
            None => Self {
                days: vec![],
                source: WeekdaySource::Unknown,
            },
        }
    }
}

pub trait WeekdayDetector: Send + Sync {
    /// Ordered, de-duplicated weekdays the event occurs on. Empty when
    /// nothing can be inferred.
    fn detect(&self, event: &Event) -> DetectedWeekdays;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TextualDetector;

impl WeekdayDetector for TextualDetector {
    fn detect(&self, event: &Event) -> DetectedWeekdays {
        let text = [
            event.recurrence_rule.as_deref().unwrap_or(""),
            event.notes.as_deref().unwrap_or(""),
            event.title.as_str(),
        ]
        .join(" ")
        .to_uppercase();

        let present: HashSet<&str> = TOKEN_PATTERN.find_iter(&text).map(|m| m.as_str()).collect();
        let mut days = vec![];
        for (token, day) in WEEKDAY_TOKENS {
            if present.contains(token) && !days.contains(&day) {
                days.push(day);
            }
        }

        let declared = byday_weekdays(&text);
        for day in &declared {
            if !days.contains(day) {
                days.push(*day);
            }
        }

        let source = if !declared.is_empty() {
            WeekdaySource::Declared
        } else {
            WeekdaySource::Inferred
        };
        DetectedWeekdays { days, source }.or_event_date(event)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StructuredDetector;

impl WeekdayDetector for StructuredDetector {
    fn detect(&self, event: &Event) -> DetectedWeekdays {
        let rule = event
            .recurrence_rule
            .as_deref()
            .unwrap_or("")
            .to_uppercase();
        DetectedWeekdays {
            days: byday_weekdays(&rule),
            source: WeekdaySource::Declared,
        }
        .or_event_date(event)
    }
}

static TEXTUAL: TextualDetector = TextualDetector;
static STRUCTURED: StructuredDetector = StructuredDetector;

/// Selects a detector from config or the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    #[default]
    Textual,
    Structured,
}

impl DetectorKind {
    pub fn detector(&self) -> &'static dyn WeekdayDetector {
        match self {
            DetectorKind::Textual => &TEXTUAL,
            DetectorKind::Structured => &STRUCTURED,
        }
    }
}

impl FromStr for DetectorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "textual" | "text" => Ok(DetectorKind::Textual),
            "structured" | "strict" => Ok(DetectorKind::Structured),
            other => Err(anyhow!("unknown weekday detector `{}`", other)),
        }
    }
}
