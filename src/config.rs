// Configuration for stardeck
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/stardeck/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the texts site
    pub base_url: String,

    /// Identifier of the text whose page controls we bind
    /// (the star control's data-star-textid attribute)
    pub text_id: String,

    /// Anti-forgery token sent as X-CSRF-TOKEN on star requests
    pub csrf_token: String,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Demo mode: resolve star requests locally without a server
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            text_id: String::new(),
            csrf_token: String::new(),
            enable_tui: true,
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Log file rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error (RUST_LOG overrides)
    pub level: String,
    /// Whether to also write logs to rotating files
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file name prefix
    pub file_prefix: String,
    /// Rotation policy for log files
    pub file_rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "stardeck.log".to_string(),
            file_rotation: LogRotation::Daily,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub base_url: Option<String>,
    pub text_id: Option<String>,
    pub csrf_token: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_prefix: Option<String>,
    pub file_rotation: Option<LogRotation>,
}

impl LoggingConfig {
    fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();
        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
            file_rotation: file.file_rotation.unwrap_or(defaults.file_rotation),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/stardeck/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("stardeck").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A broken config fails fast with a clear error instead of silently
    /// falling back to defaults while the user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\nCONFIG ERROR - Failed to parse configuration file\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, delete the file and restart stardeck.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\nCONFIG ERROR - Cannot read configuration file\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        let defaults = Self::default();

        // Base URL: env > file > default
        let base_url = std::env::var("STARDECK_BASE_URL")
            .ok()
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        // Text id: env > file > default (empty; the CLI can also supply it)
        let text_id = std::env::var("STARDECK_TEXT_ID")
            .ok()
            .or(file.text_id)
            .unwrap_or(defaults.text_id);

        // CSRF token: env > file (there is no usable default)
        let csrf_token = std::env::var("STARDECK_CSRF_TOKEN")
            .ok()
            .or(file.csrf_token)
            .unwrap_or(defaults.csrf_token);

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("STARDECK_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("STARDECK_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            base_url,
            text_id,
            csrf_token,
            enable_tui,
            demo_mode,
            logging,
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let rotation = match self.logging.file_rotation {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        };

        format!(
            r#"# stardeck configuration
# Values here are overridden by STARDECK_* environment variables.

# Base URL of the texts site
base_url = "{base_url}"

# Identifier of the text whose page controls to bind (data-star-textid)
text_id = "{text_id}"

# Anti-forgery token sent as X-CSRF-TOKEN (or set STARDECK_CSRF_TOKEN)
csrf_token = "{csrf_token}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{level}"
# Also write logs to rotating files
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
# Rotation policy: hourly, daily, never
file_rotation = "{rotation}"
"#,
            base_url = self.base_url,
            text_id = self.text_id,
            csrf_token = self.csrf_token,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
        )
    }
}
