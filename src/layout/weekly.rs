use std::collections::BTreeMap;

use serde::Serialize;

use super::palette::Palette;
use super::recurrence::{WEEKDAY_LABELS, WeekdayDetector, WeekdaySource};
use crate::render::{Cell, Span, Table, TableStyle, VerticalAlign};
use crate::schedule::{Category, Event};

pub const NO_TIME_LABEL: &str = "Time not specified";
pub const NO_RECURRING_MESSAGE: &str = "No recurring class/office-hours events found.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeeklyEntry {
    pub event_id: u64,
    pub text: String,
    pub category: Category,
    pub source: WeekdaySource,
}

/// One time slot across the seven weekday columns, Monday first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeeklyRow {
    pub time: String,
    pub days: [Vec<WeeklyEntry>; 7],
}

impl WeeklyRow {
    fn new(time: String) -> Self {
        Self {
            time,
            days: Default::default(),
        }
    }

    /// Entries for a column label such as `"Wed"`.
    pub fn day(&self, label: &str) -> &[WeeklyEntry] {
        WEEKDAY_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|idx| self.days[idx].as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyGrid {
    pub rows: Vec<WeeklyRow>,
}

fn participates(event: &Event) -> bool {
    event.recurring && matches!(event.category, Category::Class | Category::OfficeHours)
}

/// Group recurring classes and office hours by time slot and weekday.
/// Rows come out sorted by their label as text.
pub fn build_weekly_grid(events: &[Event], detector: &dyn WeekdayDetector) -> WeeklyGrid {
    let mut slots: BTreeMap<String, WeeklyRow> = BTreeMap::new();

    for event in events.iter().filter(|e| participates(e)) {
        let mut time = event.time_label();
        if time.is_empty() {
            time = NO_TIME_LABEL.to_string();
        }
        let weekdays = detector.detect(event);
        tracing::debug!(
            "Event {} ({}) recurs on {:?} [{:?}]",
            event.id,
            event.title,
            weekdays.labels(),
            weekdays.source
        );

        let row = slots
            .entry(time.clone())
            .or_insert_with(|| WeeklyRow::new(time));
        for day in &weekdays.days {
            row.days[day.num_days_from_monday() as usize].push(WeeklyEntry {
                event_id: event.id,
                text: event.description(),
                category: event.category,
                source: weekdays.source,
            });
        }
    }

    WeeklyGrid {
        rows: slots.into_values().collect(),
    }
}

impl WeeklyGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, time: &str) -> Option<&WeeklyRow> {
        self.rows.iter().find(|r| r.time == time)
    }

    pub fn to_table(&self, palette: &Palette) -> Table {
        let mut header = vec![Cell::text("Time")];
        header.extend(WEEKDAY_LABELS.iter().map(|l| Cell::text(l)));

        if self.is_empty() {
            // Only a filled grid is top aligned
            let style = TableStyle {
                valign: VerticalAlign::Bottom,
                ..TableStyle::default()
            };
            let mut table = Table::new(header, style);
            table.push_row(vec![
                Cell::text(NO_RECURRING_MESSAGE).with_colspan(WEEKDAY_LABELS.len() + 1),
            ]);
            return table;
        }

        let mut table = Table::new(header, TableStyle::default());
        for row in &self.rows {
            let mut cells = vec![Cell::text(&row.time)];
            for entries in &row.days {
                cells.push(Cell::from_lines(
                    entries
                        .iter()
                        .map(|e| vec![Span::colored(e.text.as_str(), palette.color(e.category))])
                        .collect(),
                ));
            }
            table.push_row(cells);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::recurrence::TextualDetector;
    use crate::schedule::normalize_events;
    use serde_json::json;

    fn grid(events: serde_json::Value) -> WeeklyGrid {
        let events = normalize_events(events.as_array().unwrap());
        build_weekly_grid(&events, &TextualDetector)
    }

    #[test]
    fn it_places_byday_classes_in_their_columns() {
        let grid = grid(json!([{
            "recurring": true, "category": "class", "recurrence_rule": "BYDAY=MO,WE,FR",
            "time_start": "09:00", "time_end": "09:50", "title": "Lecture"
        }]));
        let row = grid.row("09:00-09:50").unwrap();
        for day in ["Mon", "Wed", "Fri"] {
            assert_eq!(row.day(day).len(), 1);
            assert_eq!(row.day(day)[0].text, "Lecture");
        }
        for day in ["Tue", "Thu", "Sat", "Sun"] {
            assert!(row.day(day).is_empty());
        }
    }

    #[test]
    fn it_excludes_exams_and_deliverables() {
        let grid = grid(json!([
            {"recurring": true, "category": "exam", "recurrence_rule": "BYDAY=MO",
             "title": "Quiz"},
            {"recurring": true, "category": "assignment", "recurrence_rule": "BYDAY=TU",
             "title": "Problem set"},
            {"recurring": true, "category": "project", "recurrence_rule": "BYDAY=WE",
             "title": "Standup"},
            {"recurring": false, "category": "class", "recurrence_rule": "BYDAY=TH",
             "title": "Guest lecture"}
        ]));
        assert!(grid.is_empty());
        let table = grid.to_table(&Palette::default());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0].plain_text(), NO_RECURRING_MESSAGE);
        assert_eq!(table.rows[1][0].colspan, 8);
        assert_eq!(table.style.valign, VerticalAlign::Bottom);
    }

    #[test]
    fn it_labels_and_sorts_time_slots() {
        let grid = grid(json!([
            {"recurring": true, "category": "office_hours", "recurrence_rule": "every Thursday",
             "time_start": "14:00", "time_end": "16:00", "title": "Office Hours",
             "location": "Slocum 310"},
            {"recurring": true, "category": "class", "recurrence_rule": "Tuesday",
             "title": "Seminar"},
            {"recurring": true, "category": "class", "recurrence_rule": "Monday",
             "time_start": "10:00", "title": "Lab"}
        ]));
        let labels: Vec<&str> = grid.rows.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(labels, vec!["10:00", "14:00-16:00", NO_TIME_LABEL]);
        let thursday = &grid.row("14:00-16:00").unwrap().day("Thu")[0];
        assert_eq!(thursday.text, "Office Hours (Slocum 310)");
    }

    #[test]
    fn it_stacks_events_sharing_a_slot_in_input_order() {
        let grid = grid(json!([
            {"recurring": true, "category": "class", "recurrence_rule": "Monday",
             "time_start": "09:00", "time_end": "10:00", "title": "Lecture A"},
            {"recurring": true, "category": "office_hours", "recurrence_rule": "Monday",
             "time_start": "09:00", "time_end": "10:00", "title": "Drop-in"}
        ]));
        let table = grid.to_table(&Palette::default());
        assert_eq!(table.rows[1][1].plain_text(), "Lecture A\nDrop-in");
        let drop_in = &table.rows[1][1].lines[1][0];
        assert_eq!(drop_in.color.as_deref(), Some("#1a9850"));
        assert_eq!(table.style.valign, VerticalAlign::Top);
    }
}
