use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison strategy chosen for a pair of files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Text,
    Pdf,
    Docx,
    Csv,
    /// Whole-buffer byte comparison
    Binary,
}

impl FileFormat {
    /// Short label used in console messages ("Differences found in PDF files:")
    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Text => "text",
            FileFormat::Pdf => "PDF",
            FileFormat::Docx => "DOCX",
            FileFormat::Csv => "CSV",
            FileFormat::Binary => "binary",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One aligned position of a sequence diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", content = "unit", rename_all = "snake_case")]
pub enum DiffEntry {
    Unchanged(String),
    Added(String),
    Removed(String),
}

impl DiffEntry {
    pub fn unit(&self) -> &str {
        match self {
            DiffEntry::Unchanged(unit) | DiffEntry::Added(unit) | DiffEntry::Removed(unit) => unit,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, DiffEntry::Unchanged(_))
    }
}

/// Counts of each entry kind in a diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

impl DiffSummary {
    pub fn from_entries(entries: &[DiffEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry {
                DiffEntry::Unchanged(_) => summary.unchanged += 1,
                DiffEntry::Added(_) => summary.added += 1,
                DiffEntry::Removed(_) => summary.removed += 1,
            }
        }
        summary
    }

    pub fn has_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Alignment algorithm used by the sequence differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Longest-common-subsequence table with symmetric tie breaking
    #[default]
    Lcs,
    /// Myers O(ND) diff
    Myers,
    /// Patience diff (anchors on unique lines)
    Patience,
}

/// Result of the whole-buffer byte comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOutcome {
    Identical,
    Different,
}

/// Why a pair of files was routed to the binary comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryReason {
    /// Both files share an extension with no dedicated extractor
    Unsupported,
    /// The two extensions differ
    FormatMismatch,
}

/// Outcome of comparing two files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ComparisonResult {
    /// Files are byte-identical; nothing else was run
    Identical,
    /// Binary comparator found equal buffers
    IdenticalBinary { reason: BinaryReason },
    /// Extracted units were diffed
    TextDiff {
        format: FileFormat,
        entries: Vec<DiffEntry>,
    },
    /// Binary comparator found different buffers
    BinaryDifferent { reason: BinaryReason },
    /// Extraction failed and the binary comparator ran instead
    ExtractionFailed {
        format: FileFormat,
        diagnostic: String,
        fallback: BinaryOutcome,
    },
}

impl ComparisonResult {
    /// Whether the two inputs are considered different.
    ///
    /// A text diff with no added or removed units still counts as different:
    /// the bytes differ even though the extracted content lines up.
    pub fn is_different(&self) -> bool {
        match self {
            ComparisonResult::Identical | ComparisonResult::IdenticalBinary { .. } => false,
            ComparisonResult::TextDiff { .. } | ComparisonResult::BinaryDifferent { .. } => true,
            ComparisonResult::ExtractionFailed { fallback, .. } => {
                *fallback == BinaryOutcome::Different
            }
        }
    }

    pub fn summary(&self) -> Option<DiffSummary> {
        match self {
            ComparisonResult::TextDiff { entries, .. } => Some(DiffSummary::from_entries(entries)),
            _ => None,
        }
    }
}
