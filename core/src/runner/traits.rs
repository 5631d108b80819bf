use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::types::LaunchSpec;

#[async_trait]
pub trait ProcessSession: Send {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    /// Exit code, `-1` when the process was terminated by a signal.
    async fn wait(&mut self) -> anyhow::Result<i32>;
}

#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    fn name(&self) -> &str;

    /// Spawn with piped stdout/stderr and no visible window.
    async fn spawn_supervised(&self, spec: &LaunchSpec) -> anyhow::Result<Box<dyn ProcessSession>>;

    /// Hand the command to the platform shell and return once it is launched.
    async fn spawn_detached(&self, spec: &LaunchSpec) -> anyhow::Result<()>;
}
