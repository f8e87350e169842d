use crate::errors::SttError;
use crate::http::HttpClient;
use crate::temp::{named_temp_file, validate_file_id};
use log::{debug, error, info};
use reqwest::StatusCode;
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;
use url::Url;

const COPY_BUFFER_BYTES: usize = 64 * 1024;

fn parse_media_url(raw: &str) -> Result<Url, SttError> {
    let url = Url::parse(raw)
        .map_err(|e| SttError::invalid_input(format!("invalid media url '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SttError::invalid_input(format!(
            "unsupported media url scheme '{other}'"
        ))),
    }
}

fn error_from_fetch_status(status: StatusCode, url: &Url) -> SttError {
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        SttError::service_unavailable(format!("media host answered {status} for {url}"))
    } else {
        SttError::invalid_input(format!("media host answered {status} for {url}"))
    }
}

/// Streams `body` into `sink`. Failures reading the body are network errors,
/// failures writing the sink are local I/O errors.
fn copy_body<R: Read, W: Write>(body: &mut R, sink: &mut W) -> Result<u64, SttError> {
    let mut buf = vec![0u8; COPY_BUFFER_BYTES];
    let mut total = 0u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SttError::network(format!("reading media body: {e}"))),
        };
        sink.write_all(&buf[..n]).map_err(|e| SttError::io("writing media to disk", e))?;
        total += n as u64;
    }
    sink.flush().map_err(|e| SttError::io("writing media to disk", e))?;
    Ok(total)
}

/// Downloads `url` into a fresh `<file_id>-*.mp4` file in the temp dir and
/// returns its path. The file is left in place for the caller.
pub fn download_media(http: &HttpClient, url: &str, file_id: &str) -> Result<PathBuf, SttError> {
    validate_file_id(file_id)?;
    let url = parse_media_url(url)?;
    info!("Downloading media {file_id} from {url}");

    let mut resp = http.get(url.as_str()).map_err(|e| {
        error!("Failed to fetch media {file_id}: {e}");
        e
    })?;
    if !resp.status().is_success() {
        let err = error_from_fetch_status(resp.status(), &url);
        error!("Failed to fetch media {file_id}: {err}");
        return Err(err);
    }

    let mut file = named_temp_file(file_id, ".mp4")?;
    let written = copy_body(&mut resp, file.as_file_mut()).map_err(|e| {
        error!("Failed to download media {file_id}: {e}");
        e
    })?;

    let (_, path) = file
        .keep()
        .map_err(|e| SttError::io("persisting temporary input file", e.error))?;
    debug!("Wrote {written} bytes of media {file_id} to {}", path.display());
    Ok(path)
}
