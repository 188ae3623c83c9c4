//! Date and time helpers. Nothing here fails: bad input becomes `None`
//! or an empty label.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Parse a `YYYY-MM-DD` string. Blank strings and the literal
/// placeholders `None`/`null` are treated as absent.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() || value == "None" || value == "null" {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Join optional start and end times with a dash, dropping whichever
/// side is missing.
pub fn time_range_label(start: Option<&str>, end: Option<&str>) -> String {
    let label = format!("{}-{}", start.unwrap_or(""), end.unwrap_or(""));
    label.trim_matches('-').to_string()
}

/// A calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days(self) -> u32 {
        match (self.first_day(), self.next().first_day()) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `"May 2025"`
    pub fn name(self) -> String {
        match self.first_day() {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.year, self.month),
        }
    }
}

/// Every month touched by the inclusive range, in order.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<YearMonth> {
    let last = YearMonth::of(end);
    let mut current = YearMonth::of(start);
    let mut months = vec![];
    while current <= last {
        months.push(current);
        current = current.next();
    }
    months
}
