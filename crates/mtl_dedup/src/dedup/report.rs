//! Human-readable duplicate report

use std::fmt;

use super::selector::Selection;
use crate::materials::RenderEquivalence;

/// One group as listed in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Name every member was folded into
    pub canonical: String,
    /// Number of input materials in the group
    pub occurrences: usize,
    /// Folded names, already in report order
    pub duplicates: Vec<String>,
}

/// Summary of which materials were merged into which
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateReport {
    source: String,
    entries: Vec<ReportEntry>,
}

impl DuplicateReport {
    /// Build the report for a geometry file from a selection
    pub fn build<T: RenderEquivalence>(source: impl Into<String>, selection: &Selection<'_, T>) -> Self {
        let entries = selection
            .groups()
            .iter()
            .map(|group| ReportEntry {
                canonical: group.canonical_name().to_string(),
                occurrences: group.occurrences(),
                duplicates: group.duplicates().iter().map(|m| m.name().to_string()).collect(),
            })
            .collect();

        Self {
            source: source.into(),
            entries,
        }
    }

    /// Geometry file the report describes
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Listed groups
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Full report text, each group followed by a blank line
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Report text without trailing whitespace, as written to disk
    pub fn render_trimmed(&self) -> String {
        self.render().trim_end().to_string()
    }
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Duplicate materials in {}", self.source)?;
        writeln!(f, "{} distinct materials in total", self.entries.len())?;
        writeln!(f)?;

        for entry in &self.entries {
            let noun = if entry.occurrences == 1 { "occurrence" } else { "occurrences" };
            writeln!(f, "{}: {} {}", entry.canonical, entry.occurrences, noun)?;
            for duplicate in &entry.duplicates {
                writeln!(f, "\t{duplicate}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
