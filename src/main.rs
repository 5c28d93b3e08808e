//! Sweepy - A terminal UI for sweepstakes.
//!
//! Creates, browses and follows sweepstakes served by the sweepy backend.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sweepy_tui::{App, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sweepy - create and follow sweepstakes from the terminal
#[derive(Parser, Debug)]
#[command(name = "sweepy")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Log to a daily file; the terminal belongs to the UI.
fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = sweepy_tui::config::log_dir().context("locating log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "sweepy.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sweepy_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _guard = init_logging()?;

    // Load configuration
    let config_path = cli.config;
    let config = Config::load(config_path.clone()).with_context(|| match &config_path {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "loading configuration".to_string(),
    })?;

    // Run the application
    let mut app = App::new(config).context("starting sweepy")?;
    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["sweepy"]).unwrap();
        assert_eq!(cli.config, None);

        let cli = Cli::try_parse_from(["sweepy", "--config", "/tmp/sweepy.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sweepy.toml")));

        let cli = Cli::try_parse_from(["sweepy", "-c", "dev.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("dev.toml")));

        let cli = Cli::try_parse_from(["sweepy", "--config=dev.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("dev.toml")));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["sweepy", "--config"]).is_err());
        assert!(Cli::try_parse_from(["sweepy", "--verbose"]).is_err());
    }
}
