use std::{fmt, str::FromStr};

use anyhow::{Error, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::time_range_label;

/// The fixed set of event kinds a syllabus can produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Class,
    Exam,
    OfficeHours,
    Assignment,
    Project,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Class,
        Category::Exam,
        Category::OfficeHours,
        Category::Assignment,
        Category::Project,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Class => "class",
            Category::Exam => "exam",
            Category::OfficeHours => "office_hours",
            Category::Assignment => "assignment",
            Category::Project => "project",
            Category::Other => "other",
        }
    }

    /// Human readable name used in legends.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Class => "Class",
            Category::Exam => "Exam",
            Category::OfficeHours => "Office Hours",
            Category::Assignment => "Assignment",
            Category::Project => "Project",
            Category::Other => "Other",
        }
    }

    /// Map free text onto a category. Anything unrecognized is `Other`.
    pub fn from_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| anyhow!("unknown category `{}`", s))
    }
}

/// A single time-sensitive item from a syllabus after normalization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub category: Category,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub recurring: bool,
    pub recurrence_rule: Option<String>,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Event {
    /// `"09:00-09:50"`, `"23:59"` or an empty string.
    pub fn time_label(&self) -> String {
        time_range_label(self.time_start.as_deref(), self.time_end.as_deref())
    }

    /// Title with the location in parentheses when there is one.
    pub fn description(&self) -> String {
        match &self.location {
            Some(location) => format!("{} ({})", self.title, location),
            None => self.title.clone(),
        }
    }
}

/// Course metadata plus the ordered list of events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub course_name: Option<String>,
    pub instructor: Option<String>,
    pub semester: Option<String>,
    pub semester_start: Option<NaiveDate>,
    pub semester_end: Option<NaiveDate>,
    pub events: Vec<Event>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_category_variants() {
        assert_eq!(
            "office hours".parse::<Category>().unwrap(),
            Category::OfficeHours
        );
        assert_eq!(
            "Office-Hours".parse::<Category>().unwrap(),
            Category::OfficeHours
        );
        assert_eq!(" EXAM ".parse::<Category>().unwrap(), Category::Exam);
        assert!("quiz".parse::<Category>().is_err());
        assert_eq!(Category::from_lenient("quiz"), Category::Other);
    }

    #[test]
    fn it_serializes_categories_as_snake_case() {
        let json = serde_json::to_string(&Category::OfficeHours).unwrap();
        assert_eq!(json, "\"office_hours\"");
    }

    #[test]
    fn it_describes_events_with_and_without_location() {
        let mut event = Event {
            id: 1,
            category: Category::Class,
            title: String::from("Lecture"),
            date: None,
            recurring: true,
            recurrence_rule: None,
            time_start: Some(String::from("09:00")),
            time_end: None,
            location: None,
            notes: None,
        };
        assert_eq!(event.description(), "Lecture");
        assert_eq!(event.time_label(), "09:00");

        event.location = Some(String::from("Slocum 202"));
        assert_eq!(event.description(), "Lecture (Slocum 202)");
    }
}
