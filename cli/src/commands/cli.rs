use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use ydl_core::api::{AppConfig, ByteSize, DownloadOptions};

#[derive(Parser, Debug)]
#[command(name = "ydl", version, about = "Build youtube-dl command lines and run them")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// youtube-dl executable; overrides the config file and YDL_EXECUTABLE.
    #[arg(long, global = true)]
    pub executable: Option<String>,

    /// Config file to load instead of ~/.ydl/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run youtube-dl and stream its output.
    Download(DownloadArgs),
    /// Print the argument string that `download` would pass.
    Args(ArgsArgs),
    /// List output-template keywords or validate a template.
    Keywords(KeywordsArgs),
    /// Check the executable's version against the supported release.
    Version(VersionArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Hand the command to the system shell and return immediately.
    #[arg(long)]
    pub detach: bool,

    /// Stop printing live output after this many lines.
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Refuse to run unless the executable reports the supported version.
    #[arg(long)]
    pub check_version: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ArgsArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Print one token per line instead of the quoted string.
    #[arg(long)]
    pub tokens: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct KeywordsArgs {
    /// Check every %(keyword) in TEMPLATE against the catalog.
    #[arg(long, value_name = "TEMPLATE")]
    pub validate: Option<String>,

    /// Only list numeric keywords.
    #[arg(long)]
    pub numeric: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct VersionArgs {
    /// Check VERSION instead of asking the executable.
    #[arg(long, value_name = "VERSION")]
    pub expect: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Video URLs.
    #[arg(required = true)]
    pub urls: Vec<String>,

    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Output filename template, e.g. "%(title)s.%(ext)s".
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Working directory for the youtube-dl process.
    #[arg(long = "dir", value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    /// Maximum download rate, e.g. 50K or 4.2M.
    #[arg(short = 'r', long)]
    pub limit_rate: Option<ByteSize>,

    #[arg(long)]
    pub min_filesize: Option<ByteSize>,

    #[arg(long)]
    pub max_filesize: Option<ByteSize>,

    /// Only videos uploaded on this date (YYYYMMDD or YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    #[arg(long = "datebefore", value_parser = parse_date)]
    pub date_before: Option<NaiveDate>,

    #[arg(long = "dateafter", value_parser = parse_date)]
    pub date_after: Option<NaiveDate>,

    #[arg(short = 'R', long)]
    pub retries: Option<i64>,

    #[arg(long)]
    pub playlist_start: Option<i64>,

    #[arg(long)]
    pub playlist_end: Option<i64>,

    #[arg(long)]
    pub playlist_items: Option<String>,

    #[arg(long)]
    pub no_playlist: bool,

    #[arg(short = 'x', long)]
    pub extract_audio: bool,

    #[arg(long)]
    pub audio_format: Option<String>,

    /// Extra HTTP header (FIELD:VALUE). Can be specified multiple times.
    #[arg(long = "add-header", value_parser = parse_header, action = clap::ArgAction::Append)]
    pub headers: Vec<(String, String)>,

    #[arg(long)]
    pub proxy: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub cookies: Option<PathBuf>,

    #[arg(short = 'u', long)]
    pub username: Option<String>,

    #[arg(short = 'p', long)]
    pub password: Option<String>,

    #[arg(long)]
    pub write_sub: bool,

    #[arg(long)]
    pub sub_lang: Option<String>,

    #[arg(long)]
    pub restrict_filenames: bool,

    #[arg(short = 'i', long)]
    pub ignore_errors: bool,

    #[arg(long)]
    pub newline: bool,

    #[arg(short = 's', long)]
    pub simulate: bool,

    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[arg(long)]
    pub exec: Option<String>,
}

impl OptionArgs {
    pub fn to_options(&self) -> DownloadOptions {
        let mut opts = DownloadOptions::for_urls(self.urls.iter().cloned());
        opts.format = self.format.clone();
        opts.output = self.output.clone();
        opts.working_directory = self.working_directory.clone();
        opts.limit_rate = self.limit_rate;
        opts.min_filesize = self.min_filesize;
        opts.max_filesize = self.max_filesize;
        opts.date = self.date;
        opts.date_before = self.date_before;
        opts.date_after = self.date_after;
        opts.retries = self.retries;
        opts.playlist_start = self.playlist_start;
        opts.playlist_end = self.playlist_end;
        opts.playlist_items = self.playlist_items.clone();
        opts.no_playlist = self.no_playlist;
        opts.extract_audio = self.extract_audio;
        opts.audio_format = self.audio_format.clone();
        for (field, value) in &self.headers {
            opts.headers.insert(field.clone(), value.clone());
        }
        opts.proxy = self.proxy.clone();
        opts.user_agent = self.user_agent.clone();
        opts.cookies = self.cookies.clone();
        opts.username = self.username.clone();
        opts.password = self.password.clone();
        opts.write_sub = self.write_sub;
        opts.sub_lang = self.sub_lang.clone();
        opts.restrict_filenames = self.restrict_filenames;
        opts.ignore_errors = self.ignore_errors;
        opts.newline = self.newline;
        opts.simulate = self.simulate;
        opts.quiet = self.quiet;
        opts.exec = self.exec.clone();
        opts
    }

    /// Options from the command line, with the configured working directory
    /// filling in when `--dir` is absent.
    pub fn resolve(&self, cfg: &AppConfig) -> DownloadOptions {
        let mut opts = self.to_options();
        if opts.working_directory.is_none() {
            opts.working_directory = cfg
                .downloader
                .working_directory
                .as_deref()
                .map(PathBuf::from);
        }
        opts
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| format!("invalid date '{s}', expected YYYYMMDD or YYYY-MM-DD"))
}

pub fn parse_header(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid header '{s}', expected FIELD:VALUE"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("invalid header '{s}', empty field name"));
    }
    Ok((field.to_string(), value.trim().to_string()))
}
