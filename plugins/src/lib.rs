pub mod resolve;
pub mod runner;

pub use resolve::resolve_executable_path;
pub use runner::TokioProcessLauncher;
