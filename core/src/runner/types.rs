use std::path::PathBuf;

use tokio::task::JoinHandle;

use crate::error::LaunchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LaunchOptions {
    /// Ask the platform for elevated rights on shell-execute launches.
    pub elevate: bool,
    pub line_channel_capacity: usize,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            elevate: false,
            line_channel_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    /// The argument string as given, for launchers that hand it to a shell.
    pub raw_arguments: String,
    pub working_directory: Option<PathBuf>,
    pub elevate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunOutcome {
    pub run_id: String,
    pub exit_code: i32,
    pub duration_ms: u64,
    pub stdout_lines: u64,
    pub stderr_lines: u64,
    /// `DataReceived` events actually delivered before the latch tripped.
    pub delivered_lines: u64,
}

/// Result of [`super::ProcessSupervisor::execute`].
#[derive(Debug)]
pub enum Launch {
    /// Blank executable path; nothing was launched.
    Skipped,
    /// Handed to the platform shell; no events will follow.
    Detached,
    /// Running under a supervising task that delivers events to the sink.
    Supervised(JoinHandle<Result<RunOutcome, LaunchError>>),
}

impl Launch {
    pub fn started(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    /// Wait for a supervised run to deliver its `Exited` event.
    pub async fn wait(self) -> Result<Option<RunOutcome>, LaunchError> {
        match self {
            Self::Skipped | Self::Detached => Ok(None),
            Self::Supervised(handle) => handle
                .await
                .map_err(|e| LaunchError::Join(e.to_string()))?
                .map(Some),
        }
    }
}
