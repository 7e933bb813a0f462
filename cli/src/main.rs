use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use parquet_viewer_cli::app;
use parquet_viewer_cli::commands::cli::Args;
use parquet_viewer_cli::settings::CliSettings;
use parquet_viewer_core::api::{CliError, LogSink, Settings, SettingsSource};
use parquet_viewer_core::logging::file_layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    // Flush the log file; `process::exit` skips destructors.
    if let Err(e) = LogSink::global().set_log_folder(None) {
        eprintln!("failed to flush log file: {e}");
    }
    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = Args::parse();
    let settings = CliSettings::from_args(&args).map_err(|e| CliError::Config(e.to_string()))?;
    let initial = settings
        .load()
        .map_err(|e| CliError::Config(e.to_string()))?;
    init_tracing(&initial).map_err(CliError::Command)?;

    tracing::debug!(config = %settings.file().path().display(), "settings loaded");
    app::dispatch(args, Arc::new(settings)).await
}

fn init_tracing(settings: &Settings) -> Result<(), String> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(settings.log_level()).map_err(|e| e.to_string())?,
    };

    let sink = LogSink::global();
    if let Some(folder) = settings.log_folder() {
        sink.set_log_folder(Some(Path::new(&folder)))
            .map_err(|e| format!("create log dir failed: {e}"))?;
    }

    let console_layer = settings.logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer(sink.clone()))
        .init();

    Ok(())
}
