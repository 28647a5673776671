//! Log output setup.
//!
//! Events go to stdout and, when a path is given, are appended to a log file
//! as plain text.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "homework_watch=debug,info";

/// Install the global subscriber.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            (
                BoxMakeWriter::new(std::io::stdout.and(Mutex::new(file))),
                false,
            )
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    tracing::subscriber::set_global_default(subscriber(env_filter, writer, ansi))
        .map_err(|err| anyhow!("failed to initialise tracing subscriber: {err}"))
}

/// Build the fmt subscriber without installing it.
pub fn subscriber(
    env_filter: EnvFilter,
    writer: BoxMakeWriter,
    ansi: bool,
) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}
