use std::path::Path;

use anyhow::Result;

/// Resolve the executable's full path.
///
/// Priority:
/// 1. an existing absolute or relative path is used as is
/// 2. lookup on the system PATH
/// 3. otherwise an error naming the executable
pub fn resolve_executable_path(executable: &str) -> Result<String> {
    let path = Path::new(executable);

    if path.components().count() > 1 || path.is_absolute() {
        if path.is_file() {
            tracing::debug!("Using explicit path: {}", executable);
            return Ok(executable.to_string());
        }
        anyhow::bail!("Executable '{}' does not exist", executable);
    }

    match which::which(executable) {
        Ok(found) => {
            let found = found.to_string_lossy().to_string();
            tracing::debug!("Found in system PATH: {} -> {}", executable, found);
            Ok(found)
        }
        Err(e) => Err(anyhow::anyhow!(
            "Executable '{}' not found on PATH ({e}). Install youtube-dl or configure the full path.",
            executable
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("youtube-dl");
        assert!(resolve_executable_path(&missing.to_string_lossy()).is_err());
    }

    #[test]
    fn explicit_existing_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("youtube-dl");
        std::fs::write(&exe, b"").unwrap();
        let raw = exe.to_string_lossy().to_string();
        assert_eq!(resolve_executable_path(&raw).unwrap(), raw);
    }

    #[test]
    fn unknown_bare_name_is_an_error() {
        assert!(resolve_executable_path("ydl-surely-not-installed-anywhere").is_err());
    }
}
