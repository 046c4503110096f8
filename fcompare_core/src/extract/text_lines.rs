use super::split_lines;
use fcompare_common::{ExtractionError, FileFormat};
use std::fs;
use std::path::Path;

/// Read a UTF-8 text file as lines.
///
/// Invalid UTF-8 is an extraction failure, so the caller falls back to a
/// binary comparison instead of diffing mangled text.
pub fn extract(path: &Path, normalize_line_endings: bool) -> Result<Vec<String>, ExtractionError> {
    let bytes = fs::read(path).map_err(|e| ExtractionError::new(FileFormat::Text, path, e))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        ExtractionError::new(
            FileFormat::Text,
            path,
            format!("file is not valid UTF-8: {e}"),
        )
    })?;

    Ok(split_lines(&text, !normalize_line_endings))
}
