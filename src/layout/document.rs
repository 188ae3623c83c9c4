use chrono::NaiveDate;
use serde::Serialize;

use super::chronological::{ChronologicalRow, build_chronological_rows, chronological_table};
use super::month::{MonthPage, build_month_page};
use super::palette::Palette;
use super::recurrence::WeekdayDetector;
use super::semester::{SemesterRange, resolve_semester_range};
use super::weekly::{WeeklyGrid, build_weekly_grid};
use crate::render::{Block, Document, Span};
use crate::schedule::Schedule;

pub const DOCUMENT_TITLE: &str = "Syllabus Schedule Builder";
pub const WEEKLY_HEADING: &str = "Weekly Recurring Schedule";
pub const MONTHS_HEADING: &str = "Month-by-Month Calendar";
pub const TABLE_HEADING: &str = "Chronological Table";

/// Every layout artifact for one schedule. Recomputed on each call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleLayout {
    pub weekly: WeeklyGrid,
    pub range: SemesterRange,
    pub months: Vec<MonthPage>,
    pub chronological: Vec<ChronologicalRow>,
}

/// Ties the builders together. Holds no state between calls; `today`
/// only anchors the range when a schedule has no dates at all.
pub struct LayoutEngine<'a> {
    pub palette: &'a Palette,
    pub detector: &'a dyn WeekdayDetector,
    pub today: NaiveDate,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(palette: &'a Palette, detector: &'a dyn WeekdayDetector) -> Self {
        Self {
            palette,
            detector,
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn layout(&self, schedule: &Schedule) -> ScheduleLayout {
        let events = &schedule.events;
        let range = resolve_semester_range(
            schedule.semester_start,
            schedule.semester_end,
            events,
            self.today,
        );
        let months: Vec<MonthPage> = range
            .months()
            .into_iter()
            .map(|month| build_month_page(events, month, self.palette))
            .collect();
        tracing::debug!(
            "Laying out {} events over {} to {} ({} months)",
            events.len(),
            range.start,
            range.end,
            months.len()
        );

        ScheduleLayout {
            weekly: build_weekly_grid(events, self.detector),
            range,
            months,
            chronological: build_chronological_rows(events),
        }
    }

    /// Header, weekly grid, one page per month, then the table.
    pub fn assemble(&self, schedule: &Schedule) -> Document {
        let layout = self.layout(schedule);
        let mut doc = Document::default();

        doc.push(Block::Title {
            text: DOCUMENT_TITLE.to_string(),
        });
        let details = [
            ("Course", schedule.course_name.as_deref()),
            ("Instructor", schedule.instructor.as_deref()),
            ("Semester", schedule.semester.as_deref()),
        ];
        for (label, value) in details {
            let value = value.map_or_else(|| format!("Unknown {}", label), String::from);
            doc.push(Block::Heading {
                level: 3,
                text: format!("{}: {}", label, value),
            });
        }
        doc.push(Block::Paragraph {
            spans: self.legend(),
        });
        doc.push(Block::Spacer { height: 12 });

        doc.push(Block::Heading {
            level: 2,
            text: WEEKLY_HEADING.to_string(),
        });
        doc.push(Block::Spacer { height: 6 });
        doc.push(Block::Table(layout.weekly.to_table(self.palette)));

        for page in &layout.months {
            doc.push(Block::PageBreak);
            doc.push(Block::Heading {
                level: 1,
                text: MONTHS_HEADING.to_string(),
            });
            doc.push(Block::Spacer { height: 8 });
            doc.push(Block::Heading {
                level: 2,
                text: page.heading.clone(),
            });
            doc.push(Block::Spacer { height: 8 });
            doc.push(Block::Table(page.to_table()));
        }

        doc.push(Block::PageBreak);
        doc.push(Block::Heading {
            level: 1,
            text: TABLE_HEADING.to_string(),
        });
        doc.push(Block::Spacer { height: 8 });
        doc.push(Block::Table(chronological_table(&layout.chronological)));

        doc
    }

    fn legend(&self) -> Vec<Span> {
        let mut spans = vec![Span::plain("Legend:").bold()];
        for category in Palette::LEGEND_ORDER {
            spans.push(Span::plain(" "));
            spans.push(Span::colored(category.label(), self.palette.color(category)).bold());
        }
        spans
    }
}
