// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "MongoExporter";

/// Application name in lowercase (for paths, log filters and identifiers)
pub const APP_NAME_LOWER: &str = "mongo_exporter";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".mongo-exporter";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "mongo-exporter.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "MONGO_EXPORTER_CONFIG";

/// Config section holding the MongoDB connection settings
pub const MONGODB_SECTION: &str = "mongodb";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "MONGO_EXPORTER_LOG";

/// Environment variable for log output format (text or json)
pub const ENV_LOG_FORMAT: &str = "MONGO_EXPORTER_LOG_FORMAT";

// =============================================================================
// Environment Variables - MongoDB
// =============================================================================

/// Environment variable for MongoDB host
pub const ENV_MONGO_HOST: &str = "MONGO_EXPORTER_MONGO_HOST";

/// Environment variable for MongoDB port
pub const ENV_MONGO_PORT: &str = "MONGO_EXPORTER_MONGO_PORT";

/// Environment variable for MongoDB database name
pub const ENV_MONGO_DB: &str = "MONGO_EXPORTER_MONGO_DB";

/// Environment variable for MongoDB collection name
pub const ENV_MONGO_COLLECTION: &str = "MONGO_EXPORTER_MONGO_COLLECTION";

/// Environment variable for MongoDB username
pub const ENV_MONGO_USERNAME: &str = "MONGO_EXPORTER_MONGO_USERNAME";

/// Environment variable for MongoDB password
pub const ENV_MONGO_PASSWORD: &str = "MONGO_EXPORTER_MONGO_PASSWORD";

// =============================================================================
// MongoDB Defaults
// =============================================================================

/// Authentication database used for the credential pair
pub const MONGO_AUTH_SOURCE: &str = "source_database";

/// Server selection timeout used by the startup connectivity check
pub const MONGO_DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Process
// =============================================================================

/// Exit status when the exporter cannot be initialized
pub const EXIT_INIT_FAILURE: i32 = 2;

/// Exit status for any other failure
pub const EXIT_FAILURE: i32 = 1;

/// Hostname used when the local hostname cannot be resolved
pub const UNKNOWN_HOSTNAME: &str = "unknown_host";
