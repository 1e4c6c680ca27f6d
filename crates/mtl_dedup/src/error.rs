//! Error types for the deduplication core

use thiserror::Error;

/// Failures that abort deduplication of one model
///
/// Both variants mean the geometry could not be made consistent with the
/// deduplicated library, so no output may be written for that model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DedupError {
    /// A `usemtl` line names a material that no group contains
    #[error("Line {line}: material '{name}' is referenced but never defined")]
    UnresolvedMaterialReference {
        /// Referenced material name
        name: String,
        /// 1-based line number in the geometry text
        line: usize,
    },

    /// One material name belongs to two materials that render differently
    #[error("Material name '{name}' is used by materials that render differently")]
    AmbiguousMaterialName {
        /// Colliding material name
        name: String,
    },
}

/// Convenience alias for `Result<T, DedupError>`
pub type DedupResult<T> = Result<T, DedupError>;
