pub mod api;
pub mod args;
pub mod config;
pub mod downloader;
pub mod error;
pub mod keywords;
pub mod runner;
pub mod version;
