/// The one youtube-dl release whose switch set [`crate::args::DownloadOptions`] targets.
pub const SUPPORTED_VERSION: &str = "2018.09.08";

/// Exact match against [`SUPPORTED_VERSION`]. No ordering or ranges.
pub fn is_compatible_version(version: &str) -> bool {
    version == SUPPORTED_VERSION
}
