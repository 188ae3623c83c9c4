use std::path::Path;

use anyhow::{Context, Result};

use crate::core::AppConfig;
use crate::extract::{AnthropicExtractor, Extractor, extract_schedule};

pub async fn run(input: &Path, output: Option<&Path>, config: &AppConfig) -> Result<()> {
    let extractor = AnthropicExtractor::from_config(config);
    extract_to(&extractor, input, output).await
}

/// Extract with any extractor and write the normalized schedule as JSON.
pub async fn extract_to(
    extractor: &(dyn Extractor + Send + Sync),
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let document = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let schedule = extract_schedule(extractor, &document).await?;
    let json = serde_json::to_string_pretty(&schedule)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                "Wrote {} events to {}",
                schedule.events.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
