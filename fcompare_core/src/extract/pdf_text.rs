use super::split_lines;
use fcompare_common::{ExtractionError, FileFormat};
use lopdf::Document;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, warn};

/// Extract the text of every page in page order, one page after another,
/// then split it into lines.
///
/// A panic inside the PDF parser (some malformed font dictionaries trip its
/// internal assertions) is reported as an extraction error so the caller can
/// still fall back to a binary comparison.
pub fn extract(path: &Path) -> Result<Vec<String>, ExtractionError> {
    guarded(path, || extract_pages(path))
}

fn extract_pages(path: &Path) -> Result<Vec<String>, ExtractionError> {
    let document = Document::load(path).map_err(|e| ExtractionError::new(FileFormat::Pdf, path, e))?;

    let pages = document.get_pages();
    debug!("Extracting text from {} PDF pages of {}", pages.len(), path.display());

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = document.extract_text(&[*page_number]).map_err(|e| {
            ExtractionError::new(FileFormat::Pdf, path, format!("page {page_number}: {e}"))
        })?;
        text.push_str(page_text.trim_end_matches(['\r', '\n']));
        text.push('\n');
    }

    Ok(split_lines(&text, false))
}

fn guarded<F>(path: &Path, run: F) -> Result<Vec<String>, ExtractionError>
where
    F: FnOnce() -> Result<Vec<String>, ExtractionError>,
{
    panic::catch_unwind(AssertUnwindSafe(run)).unwrap_or_else(|payload| {
        let reason = panic_message(payload.as_ref());
        warn!("PDF parser panicked on {}: {}", path.display(), reason);
        Err(ExtractionError::new(
            FileFormat::Pdf,
            path,
            format!("parser panicked: {reason}"),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    /// Write a single-font PDF with one page per entry of `pages`.
    pub(crate) fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_pages_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.pdf");
        write_pdf(&path, &["First page", "Second page"]);

        let lines = extract(&path).unwrap();
        let first = lines.iter().position(|l| l.contains("First page")).unwrap();
        let second = lines.iter().position(|l| l.contains("Second page")).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_invalid_header_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf at all").unwrap();

        let err = extract(file.path()).unwrap_err();
        assert_eq!(err.format, FileFormat::Pdf);
    }

    #[test]
    fn test_parser_panic_becomes_error() {
        let path = Path::new("broken-fonts.pdf");

        let err = guarded(path, || panic!("invalid font encoding")).unwrap_err();
        assert_eq!(err.format, FileFormat::Pdf);
        assert!(err.message.contains("invalid font encoding"));

        let err = guarded(path, || panic!("{} fonts", 2)).unwrap_err();
        assert!(err.message.contains("2 fonts"));
    }
}
