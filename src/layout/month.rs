use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use super::palette::Palette;
use super::recurrence::WEEKDAY_LABELS;
use crate::render::{Cell, Span, Table, TableStyle};
use crate::schedule::{Category, Event, YearMonth};

/// Most events listed in one day cell before the rest collapse into an
/// ellipsis.
pub const MAX_EVENTS_PER_DAY: usize = 3;
pub const OVERFLOW_MARKER: &str = "...";
const DAY_ROW_HEIGHT: u32 = 80;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayEvent {
    pub event_id: u64,
    pub title: String,
    pub category: Category,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    /// Colour of the highest ranked event, if the day has any.
    pub color: Option<String>,
    pub events: Vec<DayEvent>,
    /// Events that didn't fit.
    pub hidden: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthPage {
    pub month: YearMonth,
    pub heading: String,
    /// Monday-first weeks. `None` pads days outside the month.
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthPage {
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.weeks
            .iter()
            .flatten()
            .flatten()
            .find(|cell| cell.day == day)
    }

    pub fn to_table(&self) -> Table {
        let header = WEEKDAY_LABELS.iter().map(|l| Cell::text(l)).collect();
        let mut table = Table::new(
            header,
            TableStyle {
                row_height: Some(DAY_ROW_HEIGHT),
                ..Default::default()
            },
        );

        for week in &self.weeks {
            let row = week
                .iter()
                .map(|cell| match cell {
                    None => Cell::empty(),
                    Some(cell) => day_cell(cell),
                })
                .collect();
            table.push_row(row);
        }
        table
    }
}

fn day_cell(cell: &DayCell) -> Cell {
    let number = match &cell.color {
        Some(color) => Span::colored(cell.day.to_string(), color).bold(),
        None => Span::plain(cell.day.to_string()),
    };
    let mut lines = vec![vec![number]];
    for event in &cell.events {
        lines.push(vec![Span::colored(format!("• {}", event.title), &event.color).sized(8)]);
    }
    if cell.hidden > 0 {
        lines.push(vec![Span::plain(OVERFLOW_MARKER).sized(8)]);
    }
    Cell::from_lines(lines)
}

/// Lay out one calendar month. Only events with a date inside the month
/// show up; recurring events without a date belong to the weekly grid.
pub fn build_month_page(events: &[Event], month: YearMonth, palette: &Palette) -> MonthPage {
    let mut by_day: BTreeMap<u32, Vec<&Event>> = BTreeMap::new();
    for event in events {
        if let Some(date) = event.date
            && month.contains(date)
        {
            by_day.entry(date.day()).or_default().push(event);
        }
    }

    let mut weeks = vec![];
    if let Some(first) = month.first_day() {
        let offset = first.weekday().num_days_from_monday() as usize;
        let mut cells: Vec<Option<DayCell>> = (0..offset).map(|_| None).collect();

        for day in 1..=month.days() {
            let mut day_events = by_day.remove(&day).unwrap_or_default();
            // Stable so ties keep their input order
            day_events.sort_by_key(|e| palette.rank(e.category));

            let color = day_events
                .first()
                .map(|e| palette.color(e.category).to_string());
            let hidden = day_events.len().saturating_sub(MAX_EVENTS_PER_DAY);
            let shown = day_events
                .iter()
                .take(MAX_EVENTS_PER_DAY)
                .map(|e| DayEvent {
                    event_id: e.id,
                    title: e.title.clone(),
                    category: e.category,
                    color: palette.color(e.category).to_string(),
                })
                .collect();

            cells.push(Some(DayCell {
                day,
                color,
                events: shown,
                hidden,
            }));
        }

        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        for chunk in cells.chunks(7) {
            let week: [Option<DayCell>; 7] = std::array::from_fn(|i| chunk[i].clone());
            weeks.push(week);
        }
    }

    MonthPage {
        month,
        heading: month.name(),
        weeks,
    }
}
