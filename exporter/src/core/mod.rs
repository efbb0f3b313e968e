//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod shutdown;

pub use crate::app::ExporterApp;
pub use cli::{CliConfig, Commands, LogFormat};
pub use config::{ConfigError, FileConfig, MongoConfig};
pub use shutdown::ShutdownService;
