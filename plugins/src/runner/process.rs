use anyhow::Result;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

use ydl_core::api::{LaunchSpec, ProcessLauncher, ProcessSession};

use super::shell;

/// Spawns youtube-dl through `tokio::process`.
pub struct TokioProcessLauncher {}

impl TokioProcessLauncher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TokioProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessLauncher for TokioProcessLauncher {
    fn name(&self) -> &str {
        "process"
    }

    async fn spawn_supervised(&self, spec: &LaunchSpec) -> Result<Box<dyn ProcessSession>> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &spec.working_directory {
            cmd.current_dir(dir);
        }
        hide_window(&mut cmd);

        if spec.elevate {
            tracing::debug!("elevation only applies to shell-execute launches");
        }

        let child = cmd
            .spawn()
            .map_err(|e| anyhow::anyhow!("failed to start {}: {e}", spec.program))?;
        tracing::debug!(pid = ?child.id(), program = %spec.program, "spawned");

        Ok(Box::new(ProcessRunnerSession { child }))
    }

    async fn spawn_detached(&self, spec: &LaunchSpec) -> Result<()> {
        let mut cmd = shell::shell_command(spec);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &spec.working_directory {
            cmd.current_dir(dir);
        }

        // Dropping the handle leaves the child running; tokio reaps it.
        let child = cmd
            .spawn()
            .map_err(|e| anyhow::anyhow!("failed to start {}: {e}", spec.program))?;
        tracing::debug!(pid = ?child.id(), program = %spec.program, "shell launched");
        Ok(())
    }
}

#[cfg(windows)]
fn hide_window(cmd: &mut Command) {
    use windows::Win32::System::Threading::CREATE_NO_WINDOW;
    cmd.creation_flags(CREATE_NO_WINDOW.0);
}

#[cfg(not(windows))]
fn hide_window(_cmd: &mut Command) {}

struct ProcessRunnerSession {
    child: Child,
}

#[async_trait]
impl ProcessSession for ProcessRunnerSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn wait(&mut self) -> Result<i32> {
        let status = self.child.wait().await?;
        Ok(status.code().unwrap_or(-1))
    }
}
