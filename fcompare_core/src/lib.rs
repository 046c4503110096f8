pub mod binary_diff;
pub mod comparison;
pub mod dispatch;
pub mod extract;
pub mod identity;
pub mod sequence_diff;

pub use binary_diff::BinaryDiffEngine;
pub use comparison::ComparisonEngine;
pub use dispatch::Route;
pub use extract::ExtractOptions;
pub use sequence_diff::SequenceDiffer;
