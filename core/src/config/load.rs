use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default data directory: ~/.ydl
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".ydl"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.ydl/config.toml (skipped when there is no home directory)
    let user_config = match get_data_dir() {
        Ok(dir) => Some(dir.join("config.toml")),
        Err(e) => {
            tracing::debug!("{e}; skipping user config");
            None
        }
    };

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg = load_first(user_config.as_deref(), local_config)?;
    Ok(finalize(cfg))
}

fn load_first(user_config: Option<&Path>, local_config: &Path) -> anyhow::Result<AppConfig> {
    match user_config.filter(|p| p.exists()) {
        Some(path) => read_config(path),
        None if local_config.exists() => read_config(local_config),
        None => Ok(AppConfig::default()),
    }
}

/// Load an explicit config file; a missing file is an error.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    Ok(finalize(read_config(path)?))
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("parse {} failed: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

fn finalize(mut cfg: AppConfig) -> AppConfig {
    // Environment variable overrides (highest priority)
    if let Ok(v) = std::env::var("YDL_EXECUTABLE") {
        if !v.trim().is_empty() {
            cfg.downloader.executable = v;
        }
    }
    if let Ok(v) = std::env::var("YDL_WORKING_DIR") {
        if !v.trim().is_empty() {
            cfg.downloader.working_directory = Some(v);
        }
    }

    cfg.downloader.executable = expand_path(&cfg.downloader.executable);
    cfg.downloader.working_directory = cfg
        .downloader
        .working_directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(expand_path);
    cfg.logging.directory = cfg.logging.directory.as_deref().map(expand_path);
    cfg
}

/// Expand `~` and `$VAR`; leaves the input untouched when expansion fails.
pub fn expand_path(raw: &str) -> String {
    match shellexpand::full(raw) {
        Ok(s) => s.into_owned(),
        Err(_) => shellexpand::tilde(raw).into_owned(),
    }
}
