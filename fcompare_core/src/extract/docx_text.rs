use super::split_lines;
use fcompare_common::{ExtractionError, FileFormat};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the body paragraphs of a DOCX file, one line per paragraph
/// (a paragraph with explicit breaks spans several lines).
pub fn extract(path: &Path) -> Result<Vec<String>, ExtractionError> {
    let fail = |message: String| ExtractionError::new(FileFormat::Docx, path, message);

    let file = File::open(path).map_err(|e| fail(e.to_string()))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| fail(e.to_string()))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| fail(format!("{DOCUMENT_PART}: {e}")))?;

    let paragraphs =
        body_paragraphs(BufReader::new(part)).map_err(|e| fail(format!("{DOCUMENT_PART}: {e}")))?;

    Ok(split_lines(&paragraphs.join("\n"), false))
}

/// Text of each top-level paragraph in document order.
///
/// Only direct children of `w:body` count. Paragraphs inside tables, text
/// boxes and content controls (`w:sdt`, which also holds a table of contents)
/// are skipped. `w:tab` maps to a tab, `w:br` and `w:cr` to a newline.
fn body_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut paragraph_depth = 0usize;
    let mut nested_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" | b"w:sdt" => nested_depth += 1,
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 && nested_depth == 0 {
                        current = Some(String::new());
                    }
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                let name = e.name();
                if name.as_ref() == b"w:p" && paragraph_depth == 0 && nested_depth == 0 {
                    paragraphs.push(String::new());
                } else if nested_depth == 0 {
                    if let Some(text) = current.as_mut() {
                        match name.as_ref() {
                            b"w:tab" => text.push('\t'),
                            b"w:br" | b"w:cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(t) => {
                if in_text && nested_depth == 0 {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" | b"w:sdt" => {
                    nested_depth = nested_depth.saturating_sub(1)
                },
                b"w:p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
