use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::extract::parse_model_json;
use crate::layout::{DetectorKind, LayoutEngine, Palette};
use crate::render::{Format, render_document};
use crate::schedule::{Schedule, demo_schedule, normalize_schedule};

/// The explicit format, else whatever the output extension suggests.
fn resolve_format(format: Option<Format>, output: &Path) -> Format {
    format
        .or_else(|| {
            output
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| ext.parse().ok())
        })
        .unwrap_or_default()
}

/// Read a schedule file. Accepts both our own JSON output and raw
/// extraction output, which may need the same repairs as a model reply.
pub async fn read_schedule(input: &Path) -> Result<Schedule> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => parse_model_json(&text)
            .with_context(|| format!("{} is not a schedule JSON file", input.display()))?,
    };
    normalize_schedule(&value)
}

pub async fn write_schedule(
    schedule: &Schedule,
    output: &Path,
    format: Option<Format>,
    detector: DetectorKind,
) -> Result<()> {
    let format = resolve_format(format, output);
    let palette = Palette::default();
    let engine = LayoutEngine::new(&palette, detector.detector());
    let document = engine.assemble(schedule);
    let bytes = render_document(&document, format)?;

    tokio::fs::write(output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Wrote {} page {} document to {}",
        document.page_count(),
        format,
        output.display()
    );
    Ok(())
}

pub async fn run(
    input: &Path,
    output: &Path,
    format: Option<Format>,
    detector: DetectorKind,
) -> Result<()> {
    let schedule = read_schedule(input).await?;
    write_schedule(&schedule, output, format, detector).await
}

pub async fn demo(output: &Path, format: Option<Format>, detector: DetectorKind) -> Result<()> {
    write_schedule(&demo_schedule(), output, format, detector).await
}
