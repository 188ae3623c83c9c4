mod config;
pub use config::AppConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Set up the global tracing subscriber. `extra` directives are appended
/// to the crate level default when `RUST_LOG` is not set.
pub fn init_tracing(extra: Option<&str>) {
    let default_filter = match extra {
        Some(directives) => format!("{}=debug,{}", env!("CARGO_CRATE_NAME"), directives),
        None => format!("{}=debug", env!("CARGO_CRATE_NAME")),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
