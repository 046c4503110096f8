use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use fcompare_common::{ExtractionError, FileFormat};
use std::path::Path;

/// Parse a CSV file into one unit per record.
///
/// The header is an ordinary record and ragged rows are accepted. Each
/// record is re-serialized as a canonical CSV line (see [`serialize_record`]).
pub fn extract(path: &Path, delimiter: u8) -> Result<Vec<String>, ExtractionError> {
    let fail = |message: String| ExtractionError::new(FileFormat::Csv, path, message);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| fail(e.to_string()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| fail(e.to_string()))?;
        rows.push(serialize_record(&record, delimiter).map_err(fail)?);
    }

    Ok(rows)
}

/// Serialize a record as a single CSV line without terminator.
///
/// Fields are quoted only when needed, so parsing the line with the same
/// delimiter gives back exactly the original fields in order.
pub fn serialize_record(record: &StringRecord, delimiter: u8) -> Result<String, String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(record).map_err(|e| e.to_string())?;
    let mut bytes = writer.into_inner().map_err(|e| e.to_string())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    String::from_utf8(bytes).map_err(|e| e.to_string())
}
