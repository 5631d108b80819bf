//! Launches the executable and turns its output into [`ProcessEvent`]s.
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::error::LaunchError;

use super::context::InvocationContext;
use super::events::{EventSink, ProcessEvent, SinkControl};
use super::io_pump::{self, LineStream, LineTap};
use super::traits::{ProcessLauncher, ProcessSession};
use super::types::{Launch, LaunchOptions, LaunchSpec, RunOutcome};

#[derive(Clone)]
pub struct ProcessSupervisor {
    executable: String,
    launcher: Arc<dyn ProcessLauncher>,
    options: LaunchOptions,
}

impl ProcessSupervisor {
    pub fn new(executable: impl Into<String>, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            executable: executable.into(),
            launcher,
            options: LaunchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LaunchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Start the executable with `arguments`.
    ///
    /// With a sink, the run is supervised: this returns as soon as the child
    /// is spawned and events arrive on a separate task, ending with exactly
    /// one `Exited`. Without a sink, the command goes to the platform shell
    /// and no events are produced. A blank executable path launches nothing
    /// and yields [`Launch::Skipped`].
    ///
    /// `arguments` is parsed with POSIX shell-word rules on every platform,
    /// the same rules [`crate::args::AssembledCommand::argument_string`]
    /// quotes with. An unquoted backslash escapes the next character, so a
    /// hand-written Windows path must be single-quoted (`'C:\dl'`).
    /// Launchers receive the split arguments and quote them natively.
    #[tracing::instrument(name = "ydl.execute", skip_all, fields(executable = %self.executable))]
    pub async fn execute(
        &self,
        arguments: &str,
        working_directory: Option<&Path>,
        sink: Option<Arc<dyn EventSink>>,
    ) -> Result<Launch, LaunchError> {
        if self.executable.trim().is_empty() {
            tracing::warn!("executable path is blank, nothing launched");
            return Ok(Launch::Skipped);
        }

        let args = if arguments.trim().is_empty() {
            Vec::new()
        } else {
            shell_words::split(arguments).map_err(|e| LaunchError::Arguments(e.to_string()))?
        };

        let spec = LaunchSpec {
            program: self.executable.clone(),
            args,
            raw_arguments: arguments.to_string(),
            working_directory: working_directory
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf),
            elevate: self.options.elevate,
        };

        let Some(sink) = sink else {
            self.launcher
                .spawn_detached(&spec)
                .await
                .map_err(|e| LaunchError::Spawn(format!("{e:#}")))?;
            tracing::info!(launcher = self.launcher.name(), "launched detached");
            return Ok(Launch::Detached);
        };

        let session = self
            .launcher
            .spawn_supervised(&spec)
            .await
            .map_err(|e| LaunchError::Spawn(format!("{e:#}")))?;

        let run_id = uuid::Uuid::new_v4().to_string();
        tracing::info!(
            run_id = %run_id,
            launcher = self.launcher.name(),
            args = spec.args.len(),
            "launched supervised"
        );

        let capacity = self.options.line_channel_capacity.max(1);
        let span = tracing::info_span!("ydl.supervise", run_id = %run_id);
        let handle = tokio::spawn(supervise(session, sink, capacity, run_id).instrument(span));
        Ok(Launch::Supervised(handle))
    }
}

async fn supervise(
    mut session: Box<dyn ProcessSession>,
    sink: Arc<dyn EventSink>,
    capacity: usize,
    run_id: String,
) -> Result<RunOutcome, LaunchError> {
    let started_at = Instant::now();
    let mut ctx = InvocationContext::new();

    let (line_tx, mut line_rx) = mpsc::channel::<LineTap>(capacity);
    let out_task = session
        .stdout()
        .map(|rd| io_pump::pump_stdout(rd, line_tx.clone()));
    let err_task = session
        .stderr()
        .map(|rd| io_pump::pump_stderr(rd, line_tx.clone()));
    drop(line_tx);

    while let Some(tap) = line_rx.recv().await {
        match tap.stream {
            LineStream::Stdout => {
                let Some(line) = ctx.record_stdout(tap.line) else {
                    continue;
                };
                if sink.on_event(ProcessEvent::DataReceived(line)) == SinkControl::Stop {
                    tracing::debug!("sink stopped live output");
                    ctx.trip_latch();
                }
            }
            LineStream::Stderr => {
                ctx.record_stderr();
                let _ = sink.on_event(ProcessEvent::Error(tap.line));
            }
        }
    }

    let pumps: Vec<_> = [out_task, err_task].into_iter().flatten().collect();
    let mut pump_error = None;
    for joined in futures::future::join_all(pumps).await {
        match joined {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "output pump failed");
                pump_error.get_or_insert(e);
            }
            Err(e) => {
                pump_error.get_or_insert(LaunchError::Join(e.to_string()));
            }
        }
    }

    let waited = session.wait().await;
    drop(session);

    let _ = sink.on_event(ProcessEvent::Exited(ctx.take_transcript()));

    let exit_code = waited.map_err(LaunchError::Launcher)?;
    if let Some(e) = pump_error {
        return Err(e);
    }

    let outcome = RunOutcome {
        run_id,
        exit_code,
        duration_ms: started_at.elapsed().as_millis() as u64,
        stdout_lines: ctx.stdout_lines(),
        stderr_lines: ctx.stderr_lines(),
        delivered_lines: ctx.delivered_lines(),
    };
    tracing::info!(
        exit_code = outcome.exit_code,
        duration_ms = outcome.duration_ms,
        stdout_lines = outcome.stdout_lines,
        "process exited"
    );
    Ok(outcome)
}
