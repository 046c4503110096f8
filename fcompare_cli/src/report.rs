use fcompare_common::{BinaryOutcome, ComparisonResult, DiffEntry, DiffSummary, FileFormat};
use serde::Serialize;
use std::path::Path;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

pub const IDENTICAL: &str = "The files are identical.";
pub const IDENTICAL_BINARY: &str = "The files are identical (binary comparison).";
pub const DIFFERENT_BINARY: &str = "The files are different (binary comparison).";
pub const MISSING_FILES: &str = "Error: One or both files do not exist.";
pub const NO_LINE_CHANGES: &str = "No line-level differences (files differ only in line endings).";
pub const NO_TEXT_CHANGES: &str =
    "No line-level differences (files differ only outside the extracted text).";
pub const NO_ROW_CHANGES: &str =
    "No row-level differences (files differ only in blank lines, quoting or line endings).";

/// Render a comparison result as console lines.
pub fn render(result: &ComparisonResult, use_color: bool) -> Vec<String> {
    let paint = |color: &str, text: String| {
        if use_color {
            format!("{color}{text}{RESET}")
        } else {
            text
        }
    };

    match result {
        ComparisonResult::Identical => vec![IDENTICAL.to_string()],
        ComparisonResult::IdenticalBinary { .. } => vec![IDENTICAL_BINARY.to_string()],
        ComparisonResult::BinaryDifferent { .. } => vec![DIFFERENT_BINARY.to_string()],
        ComparisonResult::ExtractionFailed {
            format,
            diagnostic,
            fallback,
        } => vec![
            paint(YELLOW, format!("Error comparing {} files: {}", format.label(), diagnostic)),
            "Falling back to binary comparison.".to_string(),
            binary_line(*fallback).to_string(),
        ],
        ComparisonResult::TextDiff { format, entries } => {
            let mut lines = vec![format!("Differences found in {} files:", format.label())];

            for entry in entries {
                match entry {
                    DiffEntry::Removed(unit) => lines.push(paint(RED, format!("- {}", display_unit(unit)))),
                    DiffEntry::Added(unit) => lines.push(paint(GREEN, format!("+ {}", display_unit(unit)))),
                    DiffEntry::Unchanged(_) => {}
                }
            }

            let summary = DiffSummary::from_entries(entries);
            if !summary.has_changes() {
                lines.push(no_changes_note(*format).to_string());
            }
            lines.push(format!(
                "{} removed, {} added, {} unchanged",
                summary.removed, summary.added, summary.unchanged
            ));
            lines
        }
    }
}

/// Why bytes can differ while every extracted unit matches
fn no_changes_note(format: FileFormat) -> &'static str {
    match format {
        FileFormat::Csv => NO_ROW_CHANGES,
        FileFormat::Pdf | FileFormat::Docx => NO_TEXT_CHANGES,
        FileFormat::Text | FileFormat::Binary => NO_LINE_CHANGES,
    }
}

fn binary_line(outcome: BinaryOutcome) -> &'static str {
    match outcome {
        BinaryOutcome::Identical => IDENTICAL_BINARY,
        BinaryOutcome::Different => DIFFERENT_BINARY,
    }
}

/// Units may carry their own terminator; printing adds one anyway.
fn display_unit(unit: &str) -> &str {
    unit.strip_suffix("\r\n")
        .or_else(|| unit.strip_suffix('\n'))
        .unwrap_or(unit)
}

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub left: String,
    pub right: String,
    pub different: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DiffSummary>,
    #[serde(flatten)]
    pub result: &'a ComparisonResult,
}

pub fn build_json_report<'a>(left: &Path, right: &Path, result: &'a ComparisonResult) -> JsonReport<'a> {
    JsonReport {
        left: left.to_string_lossy().to_string(),
        right: right.to_string_lossy().to_string(),
        different: result.is_different(),
        summary: result.summary(),
        result,
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub left: String,
    pub right: String,
    pub error: String,
}
