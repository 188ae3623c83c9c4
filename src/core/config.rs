use std::env;

use crate::layout::DetectorKind;

const DEFAULT_ANTHROPIC_HOST: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-6";
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_hostname: String,
    pub anthropic_model: String,
    pub max_tokens: u32,
    pub detector: DetectorKind,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        let anthropic_api_hostname = lookup("SYLLABUS_ANTHROPIC_HOST")
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_HOST.to_string());
        let anthropic_model =
            lookup("SYLLABUS_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let max_tokens = lookup("SYLLABUS_MAX_TOKENS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let detector = lookup("SYLLABUS_DETECTOR")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            anthropic_api_key,
            anthropic_api_hostname,
            anthropic_model,
            max_tokens,
            detector,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
