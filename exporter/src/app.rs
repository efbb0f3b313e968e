//! Core application

use anyhow::{Context, Result};
use tokio::io::BufReader;

use crate::core::cli::{self, Commands};
use crate::core::constants::{APP_NAME, EXIT_FAILURE};
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownService;
use crate::domain::export::{InitError, MongoExporter, PointValue, run_stream};

pub struct ExporterApp;

impl ExporterApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        init_logging(cli_config.log_format);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        let exporter = MongoExporter::init(&cli_config).await?;

        match command.unwrap_or(Commands::Check) {
            Commands::Check => {
                println!(
                    "{}: export target {} on {} is ready",
                    APP_NAME,
                    exporter.target(),
                    exporter.hostname()
                );
                Ok(())
            }
            Commands::Send { name, pairs } => Self::send(&exporter, &name, pairs).await,
            Commands::Stream => Self::stream(&exporter).await,
        }
    }

    /// Exit status for an error returned by [`ExporterApp::run`]
    pub fn exit_code(err: &anyhow::Error) -> i32 {
        err.downcast_ref::<InitError>()
            .map(InitError::exit_code)
            .unwrap_or(EXIT_FAILURE)
    }

    async fn send(exporter: &MongoExporter, name: &str, pairs: Vec<(String, String)>) -> Result<()> {
        let (columns, points): (Vec<String>, Vec<PointValue>) = pairs
            .into_iter()
            .map(|(column, value)| (column, PointValue::parse_lenient(&value)))
            .unzip();

        let written = exporter.export(name, columns.as_slice(), &points).await?;
        println!("Exported {} document(s) for {}", written, name);
        Ok(())
    }

    async fn stream(exporter: &MongoExporter) -> Result<()> {
        let shutdown = ShutdownService::new();
        shutdown.install_signal_handlers();

        let reader = BufReader::new(tokio::io::stdin());
        run_stream(exporter, reader, shutdown.subscribe())
            .await
            .context("Failed to read batches from stdin")?;
        Ok(())
    }
}
