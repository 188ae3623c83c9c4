use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::schedule::{Event, YearMonth, months_between};

/// Month pages drawn for one document at most.
pub const MAX_MONTHS: u32 = 120;

/// Inclusive span of dates to draw month pages for. `end >= start` always
/// holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SemesterRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SemesterRange {
    pub fn months(&self) -> Vec<YearMonth> {
        months_between(self.start, self.end)
    }
}

/// Work out the range to render.
///
/// Declared bounds win. A missing bound comes from the earliest or latest
/// dated event. With no dates at all the range collapses to the first of
/// `today`'s month. An end before the start is clamped to the start, and
/// an end more than [`MAX_MONTHS`] months out is pulled back to the last
/// day of the final allowed month.
pub fn resolve_semester_range(
    declared_start: Option<NaiveDate>,
    declared_end: Option<NaiveDate>,
    events: &[Event],
    today: NaiveDate,
) -> SemesterRange {
    let dates = events.iter().filter_map(|e| e.date);
    let start = declared_start.or_else(|| dates.clone().min());
    let end = declared_end.or_else(|| dates.max());

    let start = start.unwrap_or_else(|| YearMonth::of(today).first_day().unwrap_or(today));
    let end = end.unwrap_or(start).max(start);

    SemesterRange {
        start,
        end: cap_end(start, end),
    }
}

fn cap_end(start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let last = start
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(MAX_MONTHS)))
        .and_then(|next| next.pred_opt());
    match last {
        Some(last) if end > last => {
            tracing::warn!(
                "Semester range {} to {} spans more than {} months, stopping at {}",
                start,
                end,
                MAX_MONTHS,
                last
            );
            last
        }
        _ => end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::normalize_event;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(d: &str) -> Event {
        normalize_event(&json!({ "date": d }), 0)
    }

    #[test]
    fn it_prefers_declared_bounds() {
        let events = vec![dated("2025-01-15"), dated("2025-06-01")];
        let range = resolve_semester_range(
            Some(date(2025, 1, 20)),
            Some(date(2025, 5, 10)),
            &events,
            date(2030, 1, 1),
        );
        assert_eq!(range.start, date(2025, 1, 20));
        assert_eq!(range.end, date(2025, 5, 10));
    }

    #[test]
    fn it_derives_missing_bounds_from_event_dates() {
        let events = vec![dated("2025-03-20"), dated("2025-01-15"), dated("bad")];
        let range = resolve_semester_range(None, None, &events, date(2030, 1, 1));
        assert_eq!(range.start, date(2025, 1, 15));
        assert_eq!(range.end, date(2025, 3, 20));
        assert_eq!(range.months().len(), 3);

        let range = resolve_semester_range(Some(date(2025, 1, 1)), None, &events, date(2030, 1, 1));
        assert_eq!(range.end, date(2025, 3, 20));
    }

    #[test]
    fn it_anchors_to_the_current_month_without_dates() {
        let range = resolve_semester_range(None, None, &[], date(2026, 10, 19));
        assert_eq!(range.start, date(2026, 10, 1));
        assert_eq!(range.end, date(2026, 10, 1));
        assert_eq!(range.months().len(), 1);
    }

    #[test]
    fn it_clamps_an_end_before_the_start() {
        let range = resolve_semester_range(
            Some(date(2025, 5, 1)),
            Some(date(2025, 1, 1)),
            &[],
            date(2030, 1, 1),
        );
        assert_eq!(range.start, date(2025, 5, 1));
        assert_eq!(range.end, date(2025, 5, 1));

        // Declared start after every event date
        let events = vec![dated("2025-02-01")];
        let range = resolve_semester_range(Some(date(2025, 3, 1)), None, &events, date(2030, 1, 1));
        assert_eq!(range.end, date(2025, 3, 1));
    }

    #[test]
    fn it_caps_the_number_of_months() {
        let range = resolve_semester_range(
            Some(date(1, 1, 1)),
            Some(date(9999, 12, 31)),
            &[],
            date(2030, 1, 1),
        );
        assert_eq!(range.start, date(1, 1, 1));
        assert_eq!(range.end, date(10, 12, 31));
        assert_eq!(range.months().len(), MAX_MONTHS as usize);

        // Exactly ten years is left alone
        let range = resolve_semester_range(
            Some(date(2025, 8, 15)),
            Some(date(2035, 7, 31)),
            &[],
            date(2030, 1, 1),
        );
        assert_eq!(range.end, date(2035, 7, 31));
        assert_eq!(range.months().len(), 120);
    }
}
