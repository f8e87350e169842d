//! Fixtures shared by the integration tests of the stt crates.

pub mod audio;
pub mod mock;
#[cfg(unix)]
pub mod transcoder;

pub use audio::build_wav;
pub use mock::{MockResponse, MockServer, RecordedRequest};

use std::path::PathBuf;

/// File id that does not collide with other tests or earlier runs.
pub fn unique_id(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!("{tag}-{}-{nanos}", std::process::id())
}

/// Files in the temp dir named after `file_id`.
pub fn leftover_files(file_id: &str) -> Vec<PathBuf> {
    let prefix = format!("{file_id}-");
    std::fs::read_dir(std::env::temp_dir())
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with(&prefix))
                .unwrap_or(false)
        })
        .collect()
}
