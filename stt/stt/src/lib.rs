pub mod config;
pub mod error;
pub mod errors;
pub mod fetch;
pub mod http;
pub mod temp;
pub mod transcode;

pub use config::{AudioParams, CommonConfig, TranscodeConfig};
pub use errors::{SttError, SttResult};
pub use temp::validate_file_id;

use log::LevelFilter;

/// Initialize logging once based on provided level string.
///
/// `RUST_LOG` still wins when set, so individual modules can be turned up
/// without touching the provider level.
pub fn init_logging(level: Option<&str>) {
    let filter = level.map(parse_level_filter).unwrap_or(LevelFilter::Info);
    // A second call (tests, embedding applications) keeps the first logger.
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init();
}

/// Utility to parse a level string to LevelFilter.
pub fn parse_level_filter(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}
