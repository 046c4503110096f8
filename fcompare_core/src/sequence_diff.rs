use fcompare_common::{DiffAlgorithm, DiffEntry};
use similar::{capture_diff_slices, Algorithm, ChangeTag};
use tracing::debug;

/// Largest LCS table (in cells) built before switching to Myers
const MAX_TABLE_CELLS: usize = 16 * 1024 * 1024;

/// Index-level edit produced by the alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// `left[i] == right[j]`
    Equal(usize, usize),
    /// `left[i]` has no counterpart
    Delete(usize),
    /// `right[j]` has no counterpart
    Insert(usize),
}

/// Classifies two ordered sequences of comparable units into
/// unchanged / added / removed entries.
pub struct SequenceDiffer {
    algorithm: DiffAlgorithm,
}

impl SequenceDiffer {
    pub fn new(algorithm: DiffAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DiffAlgorithm {
        self.algorithm
    }

    /// Diff `left` against `right`.
    ///
    /// Every element of both inputs appears exactly once in the output, in
    /// order: unchanged units once, removed units from `left`, added units
    /// from `right`.
    pub fn diff(&self, left: &[String], right: &[String]) -> Vec<DiffEntry> {
        debug!(
            "Diffing {} left units against {} right units with {:?}",
            left.len(),
            right.len(),
            self.algorithm
        );

        match self.algorithm {
            DiffAlgorithm::Lcs => match lcs_edits(left, right) {
                Some(edits) => entries_from_edits(&edits, left, right),
                None => {
                    debug!("LCS table too large, falling back to Myers");
                    similar_entries(Algorithm::Myers, left, right)
                }
            },
            DiffAlgorithm::Myers => similar_entries(Algorithm::Myers, left, right),
            DiffAlgorithm::Patience => similar_entries(Algorithm::Patience, left, right),
        }
    }
}

impl Default for SequenceDiffer {
    fn default() -> Self {
        Self::new(DiffAlgorithm::default())
    }
}

/// Minimal edit script between `left` and `right`.
///
/// Common prefix and suffix are matched directly; the middle is aligned with
/// a suffix-LCS table walked from the front, so earlier matches win. When
/// dropping `left[i]` or `right[j]` is equally good, the smaller of the two
/// values is dropped. That rule is independent of argument order, so the
/// alignment of `(right, left)` mirrors that of `(left, right)`.
///
/// Returns `None` if the table for the differing middle would exceed
/// `MAX_TABLE_CELLS`.
pub fn lcs_edits<T: Ord>(left: &[T], right: &[T]) -> Option<Vec<Edit>> {
    let prefix = left
        .iter()
        .zip(right.iter())
        .take_while(|(l, r)| l == r)
        .count();
    let suffix = left[prefix..]
        .iter()
        .rev()
        .zip(right[prefix..].iter().rev())
        .take_while(|(l, r)| l == r)
        .count();

    let mid_left = &left[prefix..left.len() - suffix];
    let mid_right = &right[prefix..right.len() - suffix];
    let (rows, cols) = (mid_left.len(), mid_right.len());

    if rows.saturating_mul(cols) > MAX_TABLE_CELLS {
        return None;
    }

    let mut edits = Vec::with_capacity(prefix + suffix + rows + cols);
    edits.extend((0..prefix).map(|k| Edit::Equal(k, k)));

    // table[i * width + j] = LCS length of mid_left[i..] and mid_right[j..]
    let width = cols + 1;
    let mut table = vec![0u32; (rows + 1) * width];
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            table[i * width + j] = if mid_left[i] == mid_right[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < rows && j < cols {
        if mid_left[i] == mid_right[j] {
            edits.push(Edit::Equal(prefix + i, prefix + j));
            i += 1;
            j += 1;
            continue;
        }

        let skip_left = table[(i + 1) * width + j];
        let skip_right = table[i * width + j + 1];
        let delete = match skip_left.cmp(&skip_right) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => mid_left[i] < mid_right[j],
        };

        if delete {
            edits.push(Edit::Delete(prefix + i));
            i += 1;
        } else {
            edits.push(Edit::Insert(prefix + j));
            j += 1;
        }
    }
    edits.extend((i..rows).map(|k| Edit::Delete(prefix + k)));
    edits.extend((j..cols).map(|k| Edit::Insert(prefix + k)));

    let left_tail = left.len() - suffix;
    let right_tail = right.len() - suffix;
    edits.extend((0..suffix).map(|k| Edit::Equal(left_tail + k, right_tail + k)));

    Some(deletes_first(edits))
}

/// Within each run of changes between two equal elements, move deletions
/// ahead of insertions. Both sides keep their relative order, so the
/// alignment is unchanged; only the presentation becomes `-` then `+`.
fn deletes_first(edits: Vec<Edit>) -> Vec<Edit> {
    let mut ordered = Vec::with_capacity(edits.len());
    let mut inserts = Vec::new();

    for edit in edits {
        match edit {
            Edit::Delete(_) => ordered.push(edit),
            Edit::Insert(_) => inserts.push(edit),
            Edit::Equal(..) => {
                ordered.append(&mut inserts);
                ordered.push(edit);
            }
        }
    }
    ordered.append(&mut inserts);
    ordered
}

fn entries_from_edits(edits: &[Edit], left: &[String], right: &[String]) -> Vec<DiffEntry> {
    edits
        .iter()
        .map(|edit| match *edit {
            Edit::Equal(i, _) => DiffEntry::Unchanged(left[i].clone()),
            Edit::Delete(i) => DiffEntry::Removed(left[i].clone()),
            Edit::Insert(j) => DiffEntry::Added(right[j].clone()),
        })
        .collect()
}

fn similar_entries(algorithm: Algorithm, left: &[String], right: &[String]) -> Vec<DiffEntry> {
    let ops = capture_diff_slices(algorithm, left, right);
    ops.iter()
        .flat_map(|op| op.iter_changes(left, right))
        .map(|change| match change.tag() {
            ChangeTag::Equal => DiffEntry::Unchanged(change.value()),
            ChangeTag::Delete => DiffEntry::Removed(change.value()),
            ChangeTag::Insert => DiffEntry::Added(change.value()),
        })
        .collect()
}
