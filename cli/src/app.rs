//! Wiring layer: merges config with CLI overrides and builds the downloader.
use std::sync::Arc;

use ydl_core::api::{AppConfig, CliError, ProcessSupervisor, YoutubeDl};
use ydl_plugins::{resolve_executable_path, TokioProcessLauncher};

use crate::commands::cli::Args;

/// Load the config named by `--config`, or the default search path.
pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let cfg = match args.config.as_deref() {
        Some(path) => ydl_core::api::load_from(path),
        None => ydl_core::api::load_default(),
    };
    cfg.map_err(|e| CliError::Config(e.to_string()))
}

/// Executable named on the command line, falling back to config.
pub fn executable_for(args: &Args, cfg: &AppConfig) -> String {
    args.executable
        .as_deref()
        .map(ydl_core::config::expand_path)
        .unwrap_or_else(|| cfg.downloader.executable.clone())
}

#[tracing::instrument(name = "cli.build_downloader", skip(args, cfg))]
pub fn build_downloader(args: &Args, cfg: &AppConfig) -> YoutubeDl {
    let configured = executable_for(args, cfg);

    // A blank path stays blank so the supervisor reports "not started".
    let executable = if configured.trim().is_empty() {
        configured
    } else {
        match resolve_executable_path(&configured) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("{e:#}; launching '{configured}' as given");
                configured
            }
        }
    };

    let supervisor = ProcessSupervisor::new(executable, Arc::new(TokioProcessLauncher::new()))
        .with_options(cfg.downloader.launch_options());
    YoutubeDl::new(supervisor)
}
