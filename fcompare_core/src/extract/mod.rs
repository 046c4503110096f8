//! Format-specific extraction of comparable units.
//!
//! Each extractor turns a file into an ordered list of units (lines of text
//! or serialized CSV rows). Failures are reported as [`ExtractionError`] and
//! never abort a comparison.

#[cfg(feature = "csv-rows")]
pub mod csv_rows;
#[cfg(feature = "docx")]
pub mod docx_text;
#[cfg(feature = "pdf")]
pub mod pdf_text;
pub mod text_lines;

use fcompare_common::{AppConfig, ExtractionError, FileFormat};
use std::path::Path;

/// Knobs that change how units are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Strip line terminators from text units; when false, plain text keeps
    /// them attached so a missing final newline shows up in the diff
    pub normalize_line_endings: bool,
    pub csv_delimiter: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            normalize_line_endings: true,
            csv_delimiter: b',',
        }
    }
}

impl From<&AppConfig> for ExtractOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            normalize_line_endings: config.normalize_line_endings,
            csv_delimiter: u8::try_from(config.csv_delimiter).unwrap_or(b','),
        }
    }
}

/// Extract the comparable units of `path` as `format`.
pub fn extract(
    format: FileFormat,
    path: &Path,
    options: &ExtractOptions,
) -> Result<Vec<String>, ExtractionError> {
    match format {
        FileFormat::Text => text_lines::extract(path, options.normalize_line_endings),
        FileFormat::Pdf => extract_pdf(path),
        FileFormat::Docx => extract_docx(path),
        FileFormat::Csv => extract_csv(path, options.csv_delimiter),
        FileFormat::Binary => Err(ExtractionError::new(
            format,
            path,
            "binary files have no comparable units",
        )),
    }
}

/// Split text into lines.
///
/// With `keep_terminators` the `\n` (or `\r\n`) stays on each line. Otherwise
/// CRLF and lone CR are normalized to LF first and then stripped.
pub fn split_lines(text: &str, keep_terminators: bool) -> Vec<String> {
    if keep_terminators {
        return text.split_inclusive('\n').map(str::to_string).collect();
    }

    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<Vec<String>, ExtractionError> {
    pdf_text::extract(path)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> Result<Vec<String>, ExtractionError> {
    Err(not_compiled(FileFormat::Pdf, path, "pdf"))
}

#[cfg(feature = "docx")]
fn extract_docx(path: &Path) -> Result<Vec<String>, ExtractionError> {
    docx_text::extract(path)
}

#[cfg(not(feature = "docx"))]
fn extract_docx(path: &Path) -> Result<Vec<String>, ExtractionError> {
    Err(not_compiled(FileFormat::Docx, path, "docx"))
}

#[cfg(feature = "csv-rows")]
fn extract_csv(path: &Path, delimiter: u8) -> Result<Vec<String>, ExtractionError> {
    csv_rows::extract(path, delimiter)
}

#[cfg(not(feature = "csv-rows"))]
fn extract_csv(path: &Path, _delimiter: u8) -> Result<Vec<String>, ExtractionError> {
    Err(not_compiled(FileFormat::Csv, path, "csv-rows"))
}

#[cfg(any(not(feature = "pdf"), not(feature = "docx"), not(feature = "csv-rows")))]
fn not_compiled(format: FileFormat, path: &Path, feature: &str) -> ExtractionError {
    ExtractionError::new(
        format,
        path,
        format!("{format} support not compiled in (enable the `{feature}` feature)"),
    )
}
