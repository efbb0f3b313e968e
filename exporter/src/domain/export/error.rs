//! Exporter error types

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::constants::EXIT_INIT_FAILURE;
use crate::data::error::DataError;

/// The exporter could not be brought up.
///
/// Returned to the host instead of terminating the process, so a host running
/// several exporters can disable just this one.
#[derive(Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot connect to MongoDB server {host}:{port} ({source})")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: DataError,
    },
}

impl InitError {
    /// Process exit status for a standalone binary
    pub fn exit_code(&self) -> i32 {
        EXIT_INIT_FAILURE
    }
}

/// A batch could not be written. The batch is dropped.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot export {name} stats to MongoDB ({source})")]
    Write {
        name: String,
        #[source]
        source: DataError,
    },
}

impl ExportError {
    /// Metric family the failed batch belonged to
    pub fn name(&self) -> &str {
        match self {
            ExportError::Write { name, .. } => name,
        }
    }
}
