// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "TextDesk";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "textdesk";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".textdesk";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "textdesk.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "TEXTDESK_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "TEXTDESK_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "TEXTDESK_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "TEXTDESK_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "TEXTDESK_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5480;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "TEXTDESK_DATA_DIR";

// =============================================================================
// Environment Variables - SMS Gateway
// =============================================================================

/// Environment variable for enabling/disabling outbound SMS
pub const ENV_SMS_ENABLED: &str = "TEXTDESK_SMS_ENABLED";

/// Environment variable for the SMS gateway access key
pub const ENV_SMS_ACCESS_KEY: &str = "TEXTDESK_SMS_ACCESS_KEY";

/// Environment variable for the outbound SMS originator
pub const ENV_SMS_ORIGINATOR: &str = "TEXTDESK_SMS_ORIGINATOR";

/// Environment variable for the SMS gateway endpoint URL
pub const ENV_SMS_API_URL: &str = "TEXTDESK_SMS_API_URL";

// =============================================================================
// SMS Gateway
// =============================================================================

/// Default messages endpoint of the SMS gateway
pub const DEFAULT_SMS_API_URL: &str = "https://rest.messagebird.com/messages";

/// SMS send HTTP timeout in seconds
pub const SMS_SEND_TIMEOUT_SECS: u64 = 10;

/// Maximum gateway response bytes kept in send error messages
pub const SMS_ERROR_BODY_MAX_LEN: usize = 512;

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "textdesk.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for general API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for webhook deliveries (64 KB, SMS payloads are small)
pub const WEBHOOK_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds (5 minutes)
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// Update Check
// =============================================================================

/// crates.io API URL for checking latest version
pub const CRATES_API_URL: &str = "https://crates.io/api/v1/crates/textdesk";

/// Update check HTTP timeout in seconds
pub const UPDATE_CHECK_TIMEOUT_SECS: u64 = 3;

/// Number of retry attempts for update check
pub const UPDATE_CHECK_RETRIES: u32 = 2;

/// Delay between retry attempts in milliseconds
pub const UPDATE_CHECK_RETRY_DELAY_MS: u64 = 500;

/// Environment variable to disable update check
pub const ENV_NO_UPDATE_CHECK: &str = "TEXTDESK_NO_UPDATE_CHECK";
