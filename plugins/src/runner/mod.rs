pub mod process;
pub mod shell;

pub use process::TokioProcessLauncher;
