use serde_json::json;

use super::dates::parse_date;
use super::models::Schedule;
use super::normalize::normalize_events;

/// A small but realistic schedule for trying out the layout without
/// calling the extraction service.
pub fn demo_schedule() -> Schedule {
    let events = json!([
        { "id": 1, "category": "class", "title": "Lecture",
          "recurring": true, "recurrence_rule": "every Monday Wednesday", "date": null,
          "time_start": "10:00", "time_end": "11:15", "location": "Slocum 202",
          "notes": null },
        { "id": 2, "category": "office_hours", "title": "Prof. Martinez Office Hours",
          "recurring": true, "recurrence_rule": "every Thursday", "date": null,
          "time_start": "14:00", "time_end": "16:00", "location": "Slocum 310",
          "notes": null },
        { "id": 3, "category": "exam", "title": "Midterm Exam",
          "recurring": false, "recurrence_rule": null, "date": "2026-03-04",
          "time_start": "10:00", "time_end": "11:15", "location": "Slocum 202",
          "notes": "Covers weeks 1-6" },
        { "id": 4, "category": "assignment", "title": "Essay 1: Spatial Politics",
          "recurring": false, "recurrence_rule": null, "date": "2026-02-10",
          "time_start": "23:59", "time_end": null, "location": null,
          "notes": "Submit via Blackboard" },
        { "id": 5, "category": "project", "title": "Design Studio Project Draft",
          "recurring": false, "recurrence_rule": null, "date": "2026-03-25",
          "time_start": "23:59", "time_end": null, "location": null,
          "notes": null },
        { "id": 6, "category": "assignment", "title": "Reading Response #3",
          "recurring": false, "recurrence_rule": null, "date": "2026-02-24",
          "time_start": "23:59", "time_end": null, "location": null,
          "notes": null },
        { "id": 7, "category": "exam", "title": "Final Exam",
          "recurring": false, "recurrence_rule": null, "date": "2026-05-06",
          "time_start": "10:30", "time_end": "12:30", "location": "Slocum 202",
          "notes": "Comprehensive" },
        { "id": 8, "category": "project", "title": "Final Project Submission",
          "recurring": false, "recurrence_rule": null, "date": "2026-04-28",
          "time_start": "23:59", "time_end": null, "location": null,
          "notes": "Full portfolio + written component" },
        { "id": 9, "category": "other", "title": "Spring Break (No Class)",
          "recurring": false, "recurrence_rule": null, "date": "2026-03-16",
          "time_start": null, "time_end": null, "location": null,
          "notes": "March 16-20" },
        { "id": 10, "category": "assignment", "title": "Essay 2: Post-Capitalist Urbanism",
          "recurring": false, "recurrence_rule": null, "date": "2026-04-07",
          "time_start": "23:59", "time_end": null, "location": null,
          "notes": null }
    ]);

    Schedule {
        course_name: Some(String::from("ARC 410: Critical Theory in Architecture")),
        instructor: Some(String::from("Prof. Martinez")),
        semester: Some(String::from("Spring 2026")),
        semester_start: parse_date("2026-01-20"),
        semester_end: parse_date("2026-05-10"),
        events: events
            .as_array()
            .map(|e| normalize_events(e))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Category;

    #[test]
    fn it_builds_the_demo_schedule() {
        let schedule = demo_schedule();
        assert_eq!(schedule.events.len(), 10);
        assert_eq!(schedule.events[1].category, Category::OfficeHours);
        assert!(schedule.events[0].recurring);
        assert!(schedule.semester_start < schedule.semester_end);
    }
}
