//! Public types for the schedule API
use serde::Deserialize;

use crate::render::Format;

pub use crate::layout::ScheduleLayout;
pub use crate::schedule::Schedule;
pub use crate::session::{CourseDetails, ScheduleUpdate};

/// Query parameters for generating a document
#[derive(Deserialize, Debug, Default)]
pub struct DocumentQuery {
    pub format: Option<Format>,
}
