//! Prompts for the extraction model, rendered with Handlebars. The
//! registry runs in strict mode so a missing variable is an error rather
//! than an empty string in the prompt.

use std::fmt;

use anyhow::Result;
use handlebars::Handlebars;
use serde_json::json;

use crate::schedule::Category;

#[derive(Debug)]
pub enum Prompt {
    ExtractSchedule,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const EXTRACT_PROMPT: &str = r#"You are an academic schedule extraction assistant. Extract ALL time-sensitive events from this syllabus and return ONLY valid JSON with no markdown, backticks or explanation. Use this exact schema:
{
  "course_name": string,
  "instructor": string,
  "semester": string,
  "semester_start": "YYYY-MM-DD",
  "semester_end": "YYYY-MM-DD",
  "events": [
    {
      "id": integer,
      "category": {{#each categories}}{{#unless @first}} | {{/unless}}"{{this}}"{{/each}},
      "title": string,
      "date": "YYYY-MM-DD" or null if recurring,
      "recurring": boolean,
      "recurrence_rule": string or null,
      "time_start": "HH:MM" or null,
      "time_end": "HH:MM" or null,
      "location": string or null,
      "notes": string or null
    }
  ]
}
If any field is missing from the syllabus use null. Do not invent information. Return ONLY the JSON object."#;

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::ExtractSchedule.to_string(), EXTRACT_PROMPT)
        .expect("Failed to register template");
    registry
}

/// The instruction sent alongside the syllabus document.
pub fn extraction_prompt() -> Result<String> {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let prompt = templates().render(
        &Prompt::ExtractSchedule.to_string(),
        &json!({ "categories": categories }),
    )?;
    Ok(prompt)
}
