use anyhow::Result;
use syllabus::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
