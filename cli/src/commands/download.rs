use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ydl_core::api::{AppConfig, CliError, EventSink, ProcessEvent, SinkControl, YoutubeDl};

use super::cli::DownloadArgs;

/// Prints live output; stops once `max_lines` data lines were shown.
pub fn console_sink(max_lines: Option<usize>) -> Arc<dyn EventSink> {
    let shown = AtomicUsize::new(0);
    Arc::new(move |event: ProcessEvent| match event {
        ProcessEvent::DataReceived(line) => {
            println!("{line}");
            let n = shown.fetch_add(1, Ordering::Relaxed) + 1;
            match max_lines {
                Some(max) if n >= max => SinkControl::Stop,
                _ => SinkControl::Continue,
            }
        }
        ProcessEvent::Error(line) => {
            eprintln!("{line}");
            SinkControl::Continue
        }
        ProcessEvent::Exited(_) => {
            let _ = std::io::stdout().flush();
            SinkControl::Continue
        }
    })
}

#[tracing::instrument(name = "cli.download", skip_all)]
pub async fn run(args: DownloadArgs, ydl: &YoutubeDl, cfg: &AppConfig) -> Result<i32, CliError> {
    if args.check_version {
        let reported = ydl.probe_version().await?.unwrap_or_default();
        if !ydl.is_compatible_version(&reported) {
            return Err(CliError::Command(format!(
                "youtube-dl reports version '{reported}', expected {}",
                ydl.version()
            )));
        }
    }

    let opts = args.options.resolve(cfg);
    let sink = (!args.detach).then(|| console_sink(args.max_lines));

    let launch = ydl.run(&opts, sink).await?;
    if !launch.started() {
        return Err(CliError::Config(
            "no youtube-dl executable configured; set downloader.executable or YDL_EXECUTABLE"
                .to_string(),
        ));
    }

    match launch.wait().await? {
        Some(outcome) => {
            tracing::info!(
                run_id = %outcome.run_id,
                exit_code = outcome.exit_code,
                duration_ms = outcome.duration_ms,
                stdout_lines = outcome.stdout_lines,
                "youtube-dl finished"
            );
            Ok(outcome.exit_code)
        }
        None => Ok(0),
    }
}
