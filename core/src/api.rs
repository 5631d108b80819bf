//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `ydl_core::api` instead of reaching into internal modules.

pub use crate::args::{
    assemble, ArgValue, AssembledCommand, ByteSize, DownloadOptions, Field, FieldRole,
    KeyValueMap, OptionSet, Rendered, Translator, TranslatorBuilder, ValueKind,
};
pub use crate::config::{load_default, load_from, AppConfig, DownloaderConfig, LoggingConfig};
pub use crate::downloader::YoutubeDl;
pub use crate::error::{CliError, LaunchError};
pub use crate::keywords::{
    find_keywords, keyword_template, keywords, lookup, unknown_keywords, Keyword, KeywordMatch,
};
pub use crate::runner::{
    EventSink, Launch, LaunchOptions, LaunchSpec, ProcessEvent, ProcessLauncher, ProcessSession,
    ProcessSupervisor, RunOutcome, SinkControl,
};
pub use crate::version::{is_compatible_version, SUPPORTED_VERSION};
