use ydl_core::api::{AppConfig, YoutubeDl};

use super::cli::ArgsArgs;

/// Render what `download` would pass, without launching anything.
pub fn render(args: &ArgsArgs, ydl: &YoutubeDl, cfg: &AppConfig) -> String {
    let opts = args.options.resolve(cfg);

    let command = ydl.build(&opts);
    let mut out = String::new();
    if let Some(dir) = &command.working_directory {
        out.push_str(&format!("# cwd: {}\n", dir.display()));
    }
    if args.tokens {
        for token in &command.tokens {
            out.push_str(token);
            out.push('\n');
        }
    } else {
        out.push_str(&command.argument_string());
        out.push('\n');
    }
    out
}

pub fn run(args: ArgsArgs, ydl: &YoutubeDl, cfg: &AppConfig) -> i32 {
    print!("{}", render(&args, ydl, cfg));
    0
}
