use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod extract;
pub mod render;
pub mod serve;

use crate::core::{AppConfig, init_tracing};
use crate::layout::DetectorKind;
use crate::render::Format;

#[derive(Subcommand)]
enum Command {
    /// Extract a schedule from a syllabus document and print it as JSON
    Extract {
        /// Syllabus PDF or plain text file
        #[arg(long)]
        input: PathBuf,

        /// Write the schedule JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a schedule JSON file into a printable calendar
    Render {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,

        /// Defaults to the output file extension, then html
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// How weekdays of recurring events are worked out
        #[arg(long, value_enum)]
        detector: Option<DetectorKind>,
    },
    /// Render the bundled demo schedule
    Demo {
        #[arg(long)]
        output: PathBuf,

        #[arg(long, value_enum)]
        format: Option<Format>,
    },
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::from_env();

    // Handle each sub command
    match args.command {
        Some(Command::Extract { input, output }) => {
            init_tracing(None);
            extract::run(&input, output.as_deref(), &config).await?;
        }
        Some(Command::Render {
            input,
            output,
            format,
            detector,
        }) => {
            init_tracing(None);
            let detector = detector.unwrap_or(config.detector);
            render::run(&input, &output, format, detector).await?;
        }
        Some(Command::Demo { output, format }) => {
            init_tracing(None);
            render::demo(&output, format, config.detector).await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port, config).await?;
        }
        None => {}
    }

    Ok(())
}
