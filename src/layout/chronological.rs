use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::render::{Cell, Table, TableStyle};
use crate::schedule::{Category, Event};

pub const NO_DATED_MESSAGE: &str = "No non-recurring dated events found.";
const COLUMNS: [&str; 6] = ["Date", "Time", "Category", "Title", "Location", "Notes"];
const COLUMN_WIDTHS: [u32; 6] = [70, 55, 70, 130, 95, 120];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChronologicalRow {
    pub event_id: u64,
    pub date: NaiveDate,
    pub time: String,
    pub category: Category,
    pub title: String,
    pub location: String,
    pub notes: String,
}

impl ChronologicalRow {
    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(&self.date.format("%Y-%m-%d").to_string()),
            Cell::text(&self.time),
            Cell::text(self.category.as_str()),
            Cell::text(&self.title),
            Cell::text(&self.location),
            Cell::text(&self.notes),
        ]
    }
}

/// One row per one-off dated event, ordered by date then start time.
/// Events without a start time lead their day.
pub fn build_chronological_rows(events: &[Event]) -> Vec<ChronologicalRow> {
    events
        .iter()
        .filter(|e| !e.recurring)
        .filter_map(|e| e.date.map(|date| (date, e)))
        .sorted_by(|(a_date, a), (b_date, b)| {
            let a_time = a.time_start.as_deref().unwrap_or("");
            let b_time = b.time_start.as_deref().unwrap_or("");
            a_date.cmp(b_date).then_with(|| a_time.cmp(b_time))
        })
        .map(|(date, e)| ChronologicalRow {
            event_id: e.id,
            date,
            time: e.time_label(),
            category: e.category,
            title: e.title.clone(),
            location: e.location.clone().unwrap_or_default(),
            notes: e.notes.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn chronological_table(rows: &[ChronologicalRow]) -> Table {
    let mut table = Table::new(
        COLUMNS.iter().map(|c| Cell::text(c)).collect(),
        TableStyle {
            col_widths: Some(COLUMN_WIDTHS.to_vec()),
            ..Default::default()
        },
    );
    if rows.is_empty() {
        table.push_row(vec![Cell::text(NO_DATED_MESSAGE).with_colspan(COLUMNS.len())]);
        return table;
    }
    for row in rows {
        table.push_row(row.cells());
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::normalize_events;
    use serde_json::json;

    fn rows(events: serde_json::Value) -> Vec<ChronologicalRow> {
        build_chronological_rows(&normalize_events(events.as_array().unwrap()))
    }

    #[test]
    fn it_keeps_only_one_off_dated_events() {
        let rows = rows(json!([
            {"title": "Midterm", "category": "exam", "date": "2025-05-10"},
            {"title": "Lecture", "category": "class", "recurring": true, "date": "2025-05-05"},
            {"title": "Reading", "date": null},
            {"title": "Bad date", "date": "2025-13-01"}
        ]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Midterm");
    }

    #[test]
    fn it_sorts_by_date_then_start_time() {
        let rows = rows(json!([
            {"title": "Late", "date": "2025-03-02", "time_start": "15:00"},
            {"title": "Next week", "date": "2025-03-09"},
            {"title": "Early", "date": "2025-03-02", "time_start": "09:00"},
            {"title": "All day", "date": "2025-03-02"},
            {"title": "Earlier month", "date": "2025-02-28", "time_start": "23:59"}
        ]));
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Earlier month", "All day", "Early", "Late", "Next week"]
        );
    }

    #[test]
    fn it_fills_table_columns() {
        let rows = rows(json!([{
            "title": "Paper 1 due", "category": "assignment", "date": "2025-02-14",
            "time_start": "23:59", "location": "Canvas", "notes": "2000 words"
        }]));
        let table = chronological_table(&rows);
        assert_eq!(table.style.col_widths, Some(vec![70, 55, 70, 130, 95, 120]));
        let text: Vec<String> = table.body()[0].iter().map(|c| c.plain_text()).collect();
        assert_eq!(
            text,
            vec![
                "2025-02-14",
                "23:59",
                "assignment",
                "Paper 1 due",
                "Canvas",
                "2000 words"
            ]
        );
    }

    #[test]
    fn it_shows_a_placeholder_without_rows() {
        let table = chronological_table(&[]);
        assert_eq!(table.body().len(), 1);
        assert_eq!(table.body()[0][0].plain_text(), NO_DATED_MESSAGE);
        assert_eq!(table.body()[0][0].colspan, 6);
    }
}
