/// Lifecycle events of one supervised run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// One non-empty stdout line.
    DataReceived(String),
    /// One stderr line, forwarded verbatim.
    Error(String),
    /// Final event: every captured stdout line joined with `\n`.
    Exited(String),
}

/// Returned by a sink. `Stop` on a `DataReceived` event trips the run's latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkControl {
    #[default]
    Continue,
    Stop,
}

/// Receives events from the supervising task, never from the caller's task.
/// Called once per line, so it must not block for long.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: ProcessEvent) -> SinkControl;
}

impl<F> EventSink for F
where
    F: Fn(ProcessEvent) -> SinkControl + Send + Sync,
{
    fn on_event(&self, event: ProcessEvent) -> SinkControl {
        self(event)
    }
}
