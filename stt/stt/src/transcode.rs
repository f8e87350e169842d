use crate::config::TranscodeConfig;
use crate::errors::SttError;
use crate::temp::{named_temp_file, validate_file_id};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process::Command;

const STDERR_TAIL_BYTES: usize = 512;

/// Resolves the configured ffmpeg binary, either an explicit path or a name on `PATH`.
pub fn find_ffmpeg(cfg: &TranscodeConfig) -> Result<PathBuf, SttError> {
    let candidate = &cfg.ffmpeg_path;
    if candidate.components().count() > 1 {
        return if candidate.is_file() {
            Ok(candidate.clone())
        } else {
            Err(SttError::transcoder_unavailable(format!(
                "{} does not exist",
                candidate.display()
            )))
        };
    }
    which::which(candidate).map_err(|e| {
        SttError::transcoder_unavailable(format!(
            "{} not found on PATH, check that ffmpeg is installed: {e}",
            candidate.display()
        ))
    })
}

fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

/// Transcodes `input` to FLAC with ffmpeg and returns the encoded bytes.
pub fn convert_to_flac(
    cfg: &TranscodeConfig,
    input: &Path,
    file_id: &str,
) -> Result<Vec<u8>, SttError> {
    validate_file_id(file_id)?;
    if !input.is_file() {
        return Err(SttError::invalid_input(format!(
            "input audio {} does not exist",
            input.display()
        )));
    }
    let ffmpeg = find_ffmpeg(cfg).map_err(|e| {
        error!("Cannot transcode {file_id}: {e}");
        e
    })?;

    let output = named_temp_file(file_id, ".flac")?;

    info!("Transcoding {} to FLAC", input.display());
    let result = Command::new(&ffmpeg)
        .arg("-i")
        .arg(input)
        .args(["-c:a", "flac", "-y"])
        .arg(output.path())
        .output()
        .map_err(|e| {
            error!("Error running {}: {e}", ffmpeg.display());
            SttError::transcoder_unavailable(format!("spawning {}: {e}", ffmpeg.display()))
        })?;

    if !result.status.success() {
        let tail = stderr_tail(&result.stderr);
        error!("ffmpeg exited with {} for {file_id}: {tail}", result.status);
        return Err(SttError::transcode_failed(format!(
            "ffmpeg exited with {}: {tail}",
            result.status
        )));
    }

    let flac = std::fs::read(output.path()).map_err(|e| {
        error!("Error reading flac file {}: {e}", output.path().display());
        SttError::io(format!("reading {}", output.path().display()), e)
    })?;
    if flac.is_empty() {
        return Err(SttError::transcode_failed("ffmpeg produced an empty file"));
    }
    debug!("Transcoded {file_id} into {} FLAC bytes", flac.len());
    Ok(flac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_tail_keeps_the_end() {
        let mut stderr = vec![b'x'; 2000];
        stderr.extend_from_slice(b"Invalid data found when processing input\n");
        let tail = stderr_tail(&stderr);
        assert!(tail.ends_with("Invalid data found when processing input"));
        assert_eq!(tail.len(), STDERR_TAIL_BYTES - 1);
    }

    #[test]
    fn explicit_missing_path_is_unavailable() {
        let cfg = TranscodeConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/bin/ffmpeg"),
        };
        assert!(matches!(
            find_ffmpeg(&cfg),
            Err(SttError::TranscoderUnavailable(_))
        ));
    }
}
