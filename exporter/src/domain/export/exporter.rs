//! MongoDB metric exporter
//!
//! Turns each (name, columns, points) batch reported by the host loop into one
//! document per column/point pair and writes them with a single bulk insert.
//! Failed writes are logged and handed back to the caller; nothing is retried.

use std::sync::Arc;

use chrono::Local;
use serde::Deserialize;

use super::error::{ExportError, InitError};
use super::value::PointValue;
use crate::core::cli::CliConfig;
use crate::core::config::{ConfigError, MongoConfig};
use crate::data::mongo::MongoService;
use crate::data::traits::DocumentSink;
use crate::data::types::ExportDocument;
use crate::utils::host::local_hostname;

/// One named family of same-cycle measurements
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetricBatch {
    pub name: String,
    pub columns: Vec<String>,
    pub points: Vec<PointValue>,
}

/// Export adapter holding the sink for the lifetime of the process
pub struct MongoExporter {
    sink: Arc<dyn DocumentSink>,
    hostname: String,
}

impl MongoExporter {
    /// Load the configuration and connect.
    ///
    /// Failures are logged at critical severity and returned; the caller
    /// decides whether that ends the process.
    pub async fn init(cli: &CliConfig) -> Result<Self, InitError> {
        let hostname = local_hostname();

        let config = MongoConfig::load(cli).inspect_err(|e| match e {
            ConfigError::NotFound { .. } | ConfigError::MissingSection(_) => {
                tracing::error!(severity = "critical", error = %e, "No MongoDB configuration found");
            }
            _ => {
                tracing::error!(severity = "critical", error = %e, "Error in the MongoDB configuration");
            }
        })?;

        Self::connect(&config, hostname).await
    }

    /// Connect with an already loaded configuration
    pub async fn connect(config: &MongoConfig, hostname: String) -> Result<Self, InitError> {
        let service = MongoService::init(config).await.map_err(|source| {
            let err = InitError::Connect {
                host: config.host.clone(),
                port: config.port,
                source,
            };
            tracing::error!(severity = "critical", error = %err, "Cannot connect to MongoDB server");
            err
        })?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            "Connected to the MongoDB server {}:{}",
            config.host,
            config.port
        );

        Ok(Self::with_sink(Arc::new(service), hostname))
    }

    /// Build an exporter around any sink
    pub fn with_sink(sink: Arc<dyn DocumentSink>, hostname: impl Into<String>) -> Self {
        Self {
            sink,
            hostname: hostname.into(),
        }
    }

    /// Hostname stamped on every document (resolved once at startup)
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Destination description of the underlying sink
    pub fn target(&self) -> String {
        self.sink.target()
    }

    /// Pair columns with points and build one document per pair.
    ///
    /// Pairing stops at the shorter sequence. Each document gets its own
    /// timestamp taken as it is built.
    pub fn build_documents(
        &self,
        name: &str,
        columns: &[impl AsRef<str>],
        points: &[PointValue],
    ) -> Vec<ExportDocument> {
        columns
            .iter()
            .zip(points)
            .map(|(column, point)| ExportDocument {
                kind: name.to_string(),
                hostname: self.hostname.clone(),
                identifier: column.as_ref().to_string(),
                timestamp: Local::now(),
                value: point.to_string(),
            })
            .collect()
    }

    /// Export one metric batch.
    ///
    /// Returns the number of documents written. A failed insert is logged at
    /// error level and returned; the batch is discarded either way.
    pub async fn export(
        &self,
        name: &str,
        columns: &[impl AsRef<str>],
        points: &[PointValue],
    ) -> Result<usize, ExportError> {
        tracing::debug!(name = %name, "Export {} stats to MongoDB", name);

        if columns.len() != points.len() {
            tracing::trace!(
                name = %name,
                columns = columns.len(),
                points = points.len(),
                "Column/point length mismatch, extra entries ignored"
            );
        }

        let documents = self.build_documents(name, columns, points);
        if documents.is_empty() {
            tracing::debug!(name = %name, "Nothing to export");
            return Ok(0);
        }

        match self.sink.insert_documents(&documents).await {
            Ok(inserted) => {
                tracing::trace!(name = %name, inserted, "Batch written");
                Ok(documents.len())
            }
            Err(source) => {
                let transient = source.is_transient();
                let err = ExportError::Write {
                    name: name.to_string(),
                    source,
                };
                tracing::error!(
                    name = %name,
                    transient,
                    error = %err,
                    "Cannot export {} stats to MongoDB",
                    name
                );
                Err(err)
            }
        }
    }

    /// Export a batch received as a whole
    pub async fn export_batch(&self, batch: &MetricBatch) -> Result<usize, ExportError> {
        self.export(&batch.name, batch.columns.as_slice(), &batch.points)
            .await
    }
}
