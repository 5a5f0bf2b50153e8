//! The list of environment variables used throughout the application.

// Sonarr environment variables
pub const SONARR_URL: &str = "NEXTARR_SONARR_URL";
pub const SONARR_API_KEY: &str = "NEXTARR_SONARR_API_KEY";

// Telegram environment variables
pub const TELEGRAM_BOT_TOKEN: &str = "NEXTARR_TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "NEXTARR_TELEGRAM_CHAT_ID";

// Web API environment variables
pub const WEB_PORT: &str = "NEXTARR_WEB_PORT";

// Miscellaneous
pub const LOG_FILTER: &str = "NEXTARR_LOG_FILTER";
