//! Material deduplication core
//!
//! Grouping, canonical selection, name resolution and the duplicate report.
//! Every stage works on borrowed materials and builds fresh values; nothing
//! here keeps state between runs.

mod grouper;
mod name_index;
mod report;
mod selector;

pub use grouper::{Grouping, MaterialGroup, MaterialGrouper};
pub use name_index::NameIndex;
pub use report::{DuplicateReport, ReportEntry};
pub use selector::{CanonicalSelector, SelectedGroup, Selection};
