//! Turning a syllabus document into a `Schedule`. The model call is
//! behind the `Extractor` trait so the server and tests can swap it out.

mod anthropic;
mod parse;
mod prompt;

pub use anthropic::AnthropicExtractor;
pub use parse::parse_model_json;
pub use prompt::extraction_prompt;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::schedule::{Schedule, normalize_schedule};

#[async_trait]
pub trait Extractor {
    /// Raw JSON describing the course and its events.
    async fn extract(&self, document: &[u8]) -> Result<Value>;
}

/// Extractors read PDFs and plain UTF-8 text. Anything else is rejected
/// before a model is called.
pub fn is_supported_document(document: &[u8]) -> bool {
    document.starts_with(b"%PDF") || std::str::from_utf8(document).is_ok()
}

/// Run the extractor and validate what it returns. Either the whole
/// schedule comes back or an error does.
pub async fn extract_schedule(
    extractor: &(dyn Extractor + Send + Sync),
    document: &[u8],
) -> Result<Schedule> {
    let value = extractor.extract(document).await?;
    let schedule = normalize_schedule(&value)?;
    tracing::info!(
        "Extracted {} events for {}",
        schedule.events.len(),
        schedule.course_name.as_deref().unwrap_or("unnamed course")
    );
    Ok(schedule)
}
