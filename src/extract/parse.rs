//! Recovers a JSON object from model output that may be wrapped in
//! Markdown fences or surrounded by prose, or that has small syntax
//! slips such as trailing commas and bare keys.

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use serde_json::Value;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json|```").expect("Invalid regex"));
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("Invalid regex"));
static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_-]*)(\s*:)").expect("Invalid regex")
});

fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// The first balanced `{...}` in `text`, skipping braces inside strings.
/// An unterminated object runs to the end of the text, and text with no
/// `{` at all is returned unchanged.
fn first_json_object(text: &str) -> &str {
    let Some(start) = text.find('{') else {
        return text;
    };

    let mut depth = 0;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return &text[start..start + offset + 1];
                }
            }
            _ => {}
        }
    }
    &text[start..]
}

fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").to_string()
}

fn quote_bare_keys(text: &str) -> String {
    BARE_KEY.replace_all(text, r#"$1"$2"$3"#).to_string()
}

/// Parse model output into JSON, trying progressively more aggressive
/// repairs. The error from the last attempt is returned if all fail.
pub fn parse_model_json(text: &str) -> Result<Value> {
    let stripped = strip_code_fences(text);
    let base = first_json_object(&stripped);
    let without_commas = remove_trailing_commas(base);
    let attempts = [
        base.to_string(),
        without_commas.clone(),
        quote_bare_keys(&without_commas),
    ];

    let mut last_error = None;
    for candidate in &attempts {
        match serde_json::from_str(candidate) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }
    match last_error {
        Some(e) => Err(e).context("Unable to parse model response as JSON"),
        None => Err(anyhow!("Unable to parse model response as JSON")),
    }
}
