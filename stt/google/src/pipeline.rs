use crate::client::SpeechClient;
use log::{info, warn};
use std::path::Path;
use stt_core::fetch::download_media;
use stt_core::transcode::convert_to_flac;
use stt_core::{validate_file_id, SttError};

fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Failed to remove temporary file {}: {e}", path.display());
    }
}

/// Downloads `url`, transcodes it to FLAC and recognizes it in `language`.
pub fn transcribe_audio(
    client: &SpeechClient,
    url: &str,
    file_id: &str,
    language: &str,
) -> Result<Vec<String>, SttError> {
    validate_file_id(file_id)?;

    let source = download_media(client.http(), url, file_id)?;
    let flac = convert_to_flac(&client.cfg.transcode, &source, file_id);
    if !client.cfg.common.keep_temp_files {
        remove_quietly(&source);
    }
    let flac = flac?;

    let transcript = client.recognize(&flac, language)?;
    info!("Recognized {} alternatives for {file_id}", transcript.len());
    Ok(transcript)
}
