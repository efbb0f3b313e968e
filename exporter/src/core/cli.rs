use clap::{Parser, Subcommand, ValueEnum};

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_LOG_FORMAT, ENV_MONGO_COLLECTION, ENV_MONGO_DB, ENV_MONGO_HOST,
    ENV_MONGO_PASSWORD, ENV_MONGO_PORT, ENV_MONGO_USERNAME,
};

#[derive(Parser)]
#[command(name = "mongo-exporter")]
#[command(version, about = "Export metric batches to MongoDB", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, env = ENV_LOG_FORMAT, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// MongoDB host (overrides mongodb.host)
    #[arg(long, global = true, env = ENV_MONGO_HOST)]
    pub mongo_host: Option<String>,

    /// MongoDB port (overrides mongodb.port)
    #[arg(long, global = true, env = ENV_MONGO_PORT)]
    pub mongo_port: Option<u16>,

    /// MongoDB database name (overrides mongodb.db)
    #[arg(long, global = true, env = ENV_MONGO_DB)]
    pub mongo_db: Option<String>,

    /// MongoDB collection name (overrides mongodb.collection)
    #[arg(long, global = true, env = ENV_MONGO_COLLECTION)]
    pub mongo_collection: Option<String>,

    /// MongoDB username (overrides mongodb.username)
    #[arg(long, global = true, env = ENV_MONGO_USERNAME)]
    pub mongo_username: Option<String>,

    /// MongoDB password (overrides mongodb.password)
    #[arg(long, global = true, env = ENV_MONGO_PASSWORD, hide_env_values = true)]
    pub mongo_password: Option<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Load the configuration and verify the MongoDB connection (default command)
    Check,
    /// Export a single metric batch given as COLUMN=VALUE pairs
    Send {
        /// Metric family name (stored as the document type)
        name: String,
        /// Column/value pairs, e.g. core0=12.5
        #[arg(required = true, value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },
    /// Export JSON-lines batches read from stdin until EOF or Ctrl-C
    Stream,
}

/// Parse a COLUMN=VALUE pair from the command line
fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((column, value)) if !column.is_empty() => {
            Ok((column.to_string(), value.to_string()))
        }
        _ => Err(format!(
            "Invalid pair '{}'. Expected COLUMN=VALUE, e.g. core0=12.5",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub log_format: LogFormat,
    pub mongo_host: Option<String>,
    pub mongo_port: Option<u16>,
    pub mongo_db: Option<String>,
    pub mongo_collection: Option<String>,
    pub mongo_username: Option<String>,
    pub mongo_password: Option<String>,
}

impl CliConfig {
    /// Whether any MongoDB setting was given on the command line or environment
    pub fn has_mongo_overrides(&self) -> bool {
        self.mongo_host.is_some()
            || self.mongo_port.is_some()
            || self.mongo_db.is_some()
            || self.mongo_collection.is_some()
            || self.mongo_username.is_some()
            || self.mongo_password.is_some()
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        log_format: cli.log_format,
        mongo_host: cli.mongo_host,
        mongo_port: cli.mongo_port,
        mongo_db: cli.mongo_db,
        mongo_collection: cli.mongo_collection,
        mongo_username: cli.mongo_username,
        mongo_password: cli.mongo_password,
    };
    (config, cli.command)
}
