use crate::FileFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FcompareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, FcompareError>;

/// A format-specific extractor could not turn a file into comparable units.
///
/// The comparison engine never propagates this; it falls back to a binary
/// comparison and keeps the message as a diagnostic.
#[derive(Error, Debug, Clone)]
#[error("{format} extraction failed for {}: {message}", path.display())]
pub struct ExtractionError {
    pub format: FileFormat,
    pub path: PathBuf,
    pub message: String,
}

impl ExtractionError {
    pub fn new(format: FileFormat, path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self {
            format,
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::new(FileFormat::Pdf, "report.pdf", "invalid file header");
        assert_eq!(
            err.to_string(),
            "PDF extraction failed for report.pdf: invalid file header"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = FcompareError::NotFound(PathBuf::from("missing.txt"));
        assert_eq!(err.to_string(), "Path not found: missing.txt");
    }
}
