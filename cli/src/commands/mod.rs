pub mod args;
pub mod cli;
pub mod download;
pub mod keywords;
pub mod version;
