use serde::{Deserialize, Serialize};

use crate::runner::LaunchOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub downloader: DownloaderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "ydl_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Path or bare name of the youtube-dl executable. Blank disables launching.
    #[serde(default = "default_executable")]
    pub executable: String,

    #[serde(default)]
    pub working_directory: Option<String>,

    /// Request elevated rights for shell-execute launches.
    #[serde(default)]
    pub elevate: bool,

    #[serde(default = "default_line_channel_capacity")]
    pub line_channel_capacity: usize,
}

fn default_executable() -> String {
    "youtube-dl".to_string()
}

fn default_line_channel_capacity() -> usize {
    LaunchOptions::default().line_channel_capacity
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            working_directory: None,
            elevate: false,
            line_channel_capacity: default_line_channel_capacity(),
        }
    }
}

impl DownloaderConfig {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            elevate: self.elevate,
            line_channel_capacity: self.line_channel_capacity,
        }
    }
}
