mod context;
mod events;
mod io_pump;
mod supervisor;
mod traits;
pub mod types;

pub use context::InvocationContext;
pub use events::{EventSink, ProcessEvent, SinkControl};
pub use io_pump::{pump_stderr, pump_stdout, LineStream, LineTap};
pub use supervisor::ProcessSupervisor;
pub use traits::{ProcessLauncher, ProcessSession};
pub use types::{Launch, LaunchOptions, LaunchSpec, RunOutcome};
