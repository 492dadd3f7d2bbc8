//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Search box placeholder text
pub const DEFAULT_PLACEHOLDER: &str = "example: W10";

/// Whether suggestions are requested while typing
pub const DEFAULT_SUGGESTIONS_ENABLED: bool = true;

/// Minimum input length before suggestions are requested
pub const DEFAULT_MIN_SUGGEST_CHARACTERS: usize = 3;

/// Default view center latitude (northern England)
pub const DEFAULT_VIEW_LAT: f64 = 54.00366;

/// Default view center longitude
pub const DEFAULT_VIEW_LNG: f64 = -2.547855;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "OPENCAGE_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "opencage-search";
