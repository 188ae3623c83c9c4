//! Public types for the extract API
use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// A syllabus upload. `base64` holds the document bytes, optionally as a
/// `data:` URL.
#[derive(Deserialize, Serialize, Debug)]
pub struct ExtractRequest {
    pub base64: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ExtractResponse {
    pub data: Schedule,
}
