use ydl_core::api::{CliError, YoutubeDl};

use super::cli::VersionArgs;

/// Exit code 0 when the version matches, 1 otherwise.
pub async fn run(args: VersionArgs, ydl: &YoutubeDl) -> Result<i32, CliError> {
    let reported = match args.expect {
        Some(v) => v,
        None => ydl.probe_version().await?.ok_or_else(|| {
            CliError::Config("no youtube-dl executable configured".to_string())
        })?,
    };

    if ydl.is_compatible_version(&reported) {
        println!("{reported} (supported)");
        Ok(0)
    } else {
        println!("{reported} (unsupported, expected {})", ydl.version());
        Ok(1)
    }
}
