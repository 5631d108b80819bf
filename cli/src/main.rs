use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use ydl_cli::app;
use ydl_cli::commands::{self, cli};
use ydl_core::api::{CliError, LaunchError, LoggingConfig};

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = app::load_config(&args)?;
    init_tracing(&cfg.logging).map_err(CliError::Command)?;

    tracing::debug!(
        started_at = %chrono::Local::now().to_rfc3339(),
        "ydl starting"
    );

    let ydl = app::build_downloader(&args, &cfg);

    match args.command {
        cli::Commands::Download(a) => commands::download::run(a, &ydl, &cfg).await,
        cli::Commands::Args(a) => Ok(commands::args::run(a, &ydl, &cfg)),
        cli::Commands::Keywords(a) => commands::keywords::run(a),
        cli::Commands::Version(a) => commands::version::run(a, &ydl).await,
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: launch / IO error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Launch(le) => match le {
            LaunchError::Arguments(_) => 11,
            LaunchError::Spawn(_) => 20,
            LaunchError::StreamIo { .. } => 20,
            LaunchError::Launcher(_) => 50,
            LaunchError::Join(_) => 50,
        },
        CliError::Io(_) => 20,
        CliError::Command(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("ydl"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("ydl.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
