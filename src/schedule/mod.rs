mod dates;
mod demo;
mod models;
mod normalize;

pub use dates::{YearMonth, months_between, parse_date, time_range_label};
pub use demo::demo_schedule;
pub use models::{Category, Event, Schedule};
pub use normalize::{UNTITLED_EVENT, normalize_event, normalize_events, normalize_schedule};
