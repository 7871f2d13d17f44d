// =============================================================================
// Application Identity
// =============================================================================

/// Application name (binary name and display)
pub const APP_NAME: &str = "loghouse-query";

/// Crate target name used in log filter directives
pub const LOG_TARGET: &str = "loghouse_query";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".loghouse";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "loghouse-query.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "LOGHOUSE_QUERY_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "LOGHOUSE_QUERY_LOG";

// =============================================================================
// Environment Variables - Output
// =============================================================================

/// Environment variable enabling parameterized output
pub const ENV_PARAMS: &str = "LOGHOUSE_QUERY_PARAMS";
