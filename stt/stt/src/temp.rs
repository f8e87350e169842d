use crate::errors::SttError;
use tempfile::NamedTempFile;

/// Checks that `file_id` can be used as a temp file name prefix: non-empty,
/// only `[A-Za-z0-9._-]`, and not starting with a dot.
pub fn validate_file_id(file_id: &str) -> Result<(), SttError> {
    let ok = !file_id.is_empty()
        && file_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !file_id.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(SttError::invalid_input(format!(
            "file id '{file_id}' must be non-empty and use only [A-Za-z0-9._-]"
        )))
    }
}

/// Creates `<temp dir>/<file_id>-<random><suffix>`.
pub(crate) fn named_temp_file(file_id: &str, suffix: &str) -> Result<NamedTempFile, SttError> {
    validate_file_id(file_id)?;
    tempfile::Builder::new()
        .prefix(&format!("{file_id}-"))
        .suffix(suffix)
        .tempfile()
        .map_err(|e| SttError::io(format!("creating temporary {suffix} file"), e))
}
