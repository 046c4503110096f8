use fcompare_common::{BinaryReason, FileFormat};
use std::path::Path;

/// Where a pair of byte-different files goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Both files share a supported extension
    Extract(FileFormat),
    /// Whole-buffer comparison
    Binary(BinaryReason),
}

/// Lowercased extension of the file name, if any
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Format implied by an extension; unknown extensions map to `Binary`
pub fn format_for_extension(ext: &str) -> FileFormat {
    match ext {
        "txt" => FileFormat::Text,
        "pdf" => FileFormat::Pdf,
        "docx" => FileFormat::Docx,
        "csv" => FileFormat::Csv,
        _ => FileFormat::Binary,
    }
}

/// Pick the comparison route for two paths.
///
/// Format is inferred from the name only. Extensions must match exactly;
/// `a.txt` vs `b.csv` is binary even though both are supported.
pub fn resolve(left: &Path, right: &Path) -> Route {
    let left_ext = extension_of(left);
    let right_ext = extension_of(right);

    if left_ext != right_ext {
        return Route::Binary(BinaryReason::FormatMismatch);
    }

    match left_ext.as_deref().map(format_for_extension) {
        Some(FileFormat::Binary) | None => Route::Binary(BinaryReason::Unsupported),
        Some(format) => Route::Extract(format),
    }
}
