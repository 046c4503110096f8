use fcompare_common::{BinaryOutcome, FcompareError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Whole-buffer byte comparison, used for unsupported or mismatched formats
/// and as the fallback when extraction fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryDiffEngine;

impl BinaryDiffEngine {
    pub fn new() -> Self {
        Self
    }

    /// Read both files fully and compare their contents.
    pub fn compare_files(
        &self,
        left_path: &Path,
        right_path: &Path,
    ) -> Result<BinaryOutcome, FcompareError> {
        let left = fs::read(left_path)?;
        let right = fs::read(right_path)?;

        debug!(
            "Binary comparison of {} bytes against {} bytes",
            left.len(),
            right.len()
        );

        Ok(Self::compare_bytes(&left, &right))
    }

    pub fn compare_bytes(left: &[u8], right: &[u8]) -> BinaryOutcome {
        if left == right {
            BinaryOutcome::Identical
        } else {
            BinaryOutcome::Different
        }
    }
}
