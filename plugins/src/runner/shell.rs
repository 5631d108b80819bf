//! Detached launches: the command goes to `sh` on unix, and to a new console
//! (or an elevated `Start-Process`) on Windows, with no redirection.
use tokio::process::Command;

use ydl_core::api::LaunchSpec;

#[cfg(not(windows))]
pub fn shell_command(spec: &LaunchSpec) -> Command {
    if spec.elevate {
        tracing::warn!("elevation is not supported on this platform, launching normally");
    }
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line(spec));
    cmd
}

#[cfg(windows)]
pub fn shell_command(spec: &LaunchSpec) -> Command {
    let mut cmd = if spec.elevate {
        let mut ps = Command::new("powershell");
        ps.args(["-NoProfile", "-NonInteractive", "-Command"]);
        let mut script = format!(
            "Start-Process -Verb RunAs -FilePath {}",
            ps_quote(&spec.program)
        );
        if !spec.args.is_empty() {
            script.push_str(&format!(
                " -ArgumentList {}",
                ps_quote(&msvc_command_line(&spec.args))
            ));
        }
        if let Some(dir) = &spec.working_directory {
            script.push_str(&format!(
                " -WorkingDirectory {}",
                ps_quote(&dir.to_string_lossy())
            ));
        }
        ps.arg(script);
        ps
    } else {
        use windows::Win32::System::Threading::CREATE_NEW_CONSOLE;
        // std quotes each argument the way CommandLineToArgvW splits it.
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        cmd.creation_flags(CREATE_NEW_CONSOLE.0);
        cmd
    };
    cmd.kill_on_drop(false);
    cmd
}

#[cfg(windows)]
fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote one argument so the MSVC runtime (`CommandLineToArgvW`) reads it
/// back unchanged. Backslashes are literal unless they precede a `"`.
pub fn msvc_quote(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '\n', '\x0b', '"']) {
        return arg.to_string();
    }

    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                out.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat('\\').take(backslashes));
                out.push(c);
                backslashes = 0;
            }
        }
    }
    out.extend(std::iter::repeat('\\').take(backslashes * 2));
    out.push('"');
    out
}

/// Already-split arguments joined into one Windows command-line tail.
pub fn msvc_command_line(args: &[String]) -> String {
    args.iter()
        .map(|a| msvc_quote(a))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `exec <program> <arguments>` with the program quoted and the arguments
/// passed through as given.
#[cfg(not(windows))]
pub fn command_line(spec: &LaunchSpec) -> String {
    let program = shell_words::quote(&spec.program);
    if spec.raw_arguments.trim().is_empty() {
        format!("exec {program}")
    } else {
        format!("exec {program} {}", spec.raw_arguments)
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(program: &str, raw: &str) -> LaunchSpec {
        LaunchSpec {
            program: program.to_string(),
            args: shell_words::split(raw).unwrap(),
            raw_arguments: raw.to_string(),
            working_directory: None,
            elevate: false,
        }
    }

    #[test]
    fn quotes_program_and_passes_arguments_through() {
        let s = spec("/opt/my tools/youtube-dl", "-f best 'a b'");
        assert_eq!(
            command_line(&s),
            "exec '/opt/my tools/youtube-dl' -f best 'a b'"
        );
    }

    #[test]
    fn no_arguments() {
        assert_eq!(command_line(&spec("youtube-dl", "  ")), "exec youtube-dl");
    }

    #[test]
    fn runs_through_sh() {
        let cmd = shell_command(&spec("youtube-dl", "--version"));
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "sh");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec!["-c", "exec youtube-dl --version"]);
    }
}
