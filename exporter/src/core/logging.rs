use tracing_subscriber::EnvFilter;

use super::cli::LogFormat;
use super::constants::{APP_NAME_LOWER, ENV_LOG};

/// Filter directive used when neither log variable is set
pub fn default_filter() -> String {
    format!("info,{}=info", APP_NAME_LOWER)
}

/// Resolve the filter directive: exporter variable, then `RUST_LOG`, then default
pub fn filter_directive() -> String {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_filter())
}

/// Install the global subscriber
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_new(filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(filter);

    match format {
        LogFormat::Text => builder.with_ansi(true).compact().init(),
        LogFormat::Json => builder.with_ansi(false).json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(), "info,mongo_exporter=info");
        assert!(EnvFilter::try_new(default_filter()).is_ok());
    }
}
