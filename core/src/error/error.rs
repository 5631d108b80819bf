use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("launch failed: {0}")]
    Launch(#[from] LaunchError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("invalid argument string: {0}")]
    Arguments(String),
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("launcher error: {0}")]
    Launcher(#[from] anyhow::Error),
    #[error("supervisor task failed: {0}")]
    Join(String),
}
