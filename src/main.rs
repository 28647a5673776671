use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use homework_watch::logging::init_logging;
use homework_watch::{PracticumClient, Poller, Settings, TelegramNotifier};

#[derive(Parser, Debug)]
#[command(name = "homework-watch")]
#[command(about = "Watches homework review status and reports changes to Telegram")]
struct Args {
    /// Optional TOML file with settings (environment variables take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File that log output is appended to
    #[arg(long, default_value = "homework-watch.log", conflicts_with = "no_log_file")]
    log_file: PathBuf,

    /// Log to stdout only
    #[arg(long)]
    no_log_file: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = (!args.no_log_file).then_some(args.log_file.as_path());
    init_logging(log_file)?;

    // Credentials are checked before anything touches the network
    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Required configuration is missing, shutting down");
            return Err(e.into());
        }
    };
    info!("All required environment variables are set");

    let api = PracticumClient::from_settings(&settings).context("failed to create API client")?;
    let notifier =
        TelegramNotifier::from_settings(&settings).context("failed to create Telegram notifier")?;

    let cursor = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;

    let mut poller = Poller::new(api, notifier, cursor, settings.retry_period);
    poller.run().await;

    Ok(())
}
