use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCRIPT: &str = r#"#!/bin/sh
dir=$(dirname "$0")
printf '%s\n' "$@" > "$dir/argv.txt"
for last; do :; done
cat "$dir/output.bin" > "$last"
"#;

/// Shell script standing in for ffmpeg. It records its arguments and writes
/// a fixed payload to the last one, the output path.
pub struct FakeTranscoder {
    dir: TempDir,
    path: PathBuf,
}

impl FakeTranscoder {
    pub fn new(output: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("output.bin"), output).unwrap();
        let path = dir.path().join("ffmpeg");
        std::fs::write(&path, SCRIPT).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arguments of the last invocation, empty if it never ran.
    pub fn argv(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("argv.txt"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
