//! Turns a normalized schedule into the three calendar views: a weekly
//! grid of recurring sessions, a page per month and a chronological table
//! of one-off events. Every builder is a pure function of its input.

mod chronological;
mod document;
mod month;
mod palette;
mod recurrence;
mod semester;
mod weekly;

pub use chronological::{
    ChronologicalRow, NO_DATED_MESSAGE, build_chronological_rows, chronological_table,
};
pub use document::{
    DOCUMENT_TITLE, LayoutEngine, MONTHS_HEADING, ScheduleLayout, TABLE_HEADING, WEEKLY_HEADING,
};
pub use month::{
    DayCell, DayEvent, MAX_EVENTS_PER_DAY, MonthPage, OVERFLOW_MARKER, build_month_page,
};
pub use palette::{CategoryStyle, Palette};
pub use recurrence::{
    DetectedWeekdays, DetectorKind, StructuredDetector, TextualDetector, WEEKDAY_LABELS,
    WeekdayDetector, WeekdaySource, weekday_label,
};
pub use semester::{SemesterRange, resolve_semester_range};
pub use weekly::{
    NO_RECURRING_MESSAGE, NO_TIME_LABEL, WeeklyEntry, WeeklyGrid, WeeklyRow, build_weekly_grid,
};
