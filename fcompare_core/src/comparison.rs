use crate::binary_diff::BinaryDiffEngine;
use crate::dispatch::{self, Route};
use crate::extract::{self, ExtractOptions};
use crate::identity;
use crate::sequence_diff::SequenceDiffer;
use fcompare_common::{
    AppConfig, BinaryOutcome, BinaryReason, ComparisonResult, DiffAlgorithm, ExtractionError,
    FcompareError, FileFormat,
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Compares two files: existence, byte identity, format dispatch,
/// extraction and diff, with binary comparison as the fallback.
pub struct ComparisonEngine {
    differ: SequenceDiffer,
    options: ExtractOptions,
    binary: BinaryDiffEngine,
}

impl ComparisonEngine {
    pub fn new() -> Self {
        Self {
            differ: SequenceDiffer::default(),
            options: ExtractOptions::default(),
            binary: BinaryDiffEngine::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .with_algorithm(config.algorithm)
            .with_options(ExtractOptions::from(config))
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.differ = SequenceDiffer::new(algorithm);
        self
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Compare two files.
    ///
    /// Missing inputs are `NotFound`; I/O failures during the identity check
    /// or binary comparison propagate. Extraction failures never do.
    pub fn compare(&self, left: &Path, right: &Path) -> Result<ComparisonResult, FcompareError> {
        identity::ensure_file(left)?;
        identity::ensure_file(right)?;

        info!("Comparing {} with {}", left.display(), right.display());

        if identity::files_identical(left, right)? {
            debug!("Files are byte-identical");
            return Ok(ComparisonResult::Identical);
        }

        match dispatch::resolve(left, right) {
            Route::Extract(format) => self.compare_extracted(format, left, right),
            Route::Binary(reason) => {
                info!("Using binary comparison ({:?})", reason);
                self.compare_binary(reason, left, right)
            }
        }
    }

    fn compare_extracted(
        &self,
        format: FileFormat,
        left: &Path,
        right: &Path,
    ) -> Result<ComparisonResult, FcompareError> {
        info!("Using {} comparison", format);

        match self.extract_both(format, left, right) {
            Ok((left_units, right_units)) => {
                let entries = self.differ.diff(&left_units, &right_units);
                Ok(ComparisonResult::TextDiff { format, entries })
            }
            Err(err) => {
                warn!("{err}; falling back to binary comparison");
                let fallback = self.binary.compare_files(left, right)?;
                Ok(ComparisonResult::ExtractionFailed {
                    format,
                    diagnostic: err.to_string(),
                    fallback,
                })
            }
        }
    }

    fn extract_both(
        &self,
        format: FileFormat,
        left: &Path,
        right: &Path,
    ) -> Result<(Vec<String>, Vec<String>), ExtractionError> {
        let left_units = extract::extract(format, left, &self.options)?;
        let right_units = extract::extract(format, right, &self.options)?;
        debug!(
            "Extracted {} left units and {} right units",
            left_units.len(),
            right_units.len()
        );
        Ok((left_units, right_units))
    }

    fn compare_binary(
        &self,
        reason: BinaryReason,
        left: &Path,
        right: &Path,
    ) -> Result<ComparisonResult, FcompareError> {
        Ok(match self.binary.compare_files(left, right)? {
            BinaryOutcome::Identical => ComparisonResult::IdenticalBinary { reason },
            BinaryOutcome::Different => ComparisonResult::BinaryDifferent { reason },
        })
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new()
    }
}
