mod load;
mod types;

pub use load::{expand_path, get_data_dir, load_default, load_from};
pub use types::{AppConfig, DownloaderConfig, LoggingConfig};
