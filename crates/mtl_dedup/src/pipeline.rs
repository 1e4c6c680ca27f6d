//! Deduplication pipeline
//!
//! Runs Grouper → Selector → {Rewriter, Emitter, Report} for one model and
//! returns every output text at once. Nothing is written anywhere; callers
//! persist the texts only after [`Deduplicator::run`] succeeded.

use crate::dedup::{CanonicalSelector, DuplicateReport, MaterialGrouper, NameIndex};
use crate::error::DedupResult;
use crate::geometry::ReferenceRewriter;
use crate::materials::{EmitOptions, Material, MtlWriter};

/// Per-run options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOptions {
    /// File name written into every `mtllib` line
    pub library_file: String,
    /// Library emission options
    pub emit: EmitOptions,
}

impl DedupOptions {
    /// Options referencing `library_file`, no texture normalization
    pub fn new(library_file: impl Into<String>) -> Self {
        Self {
            library_file: library_file.into(),
            emit: EmitOptions::default(),
        }
    }

    /// Enable or disable PNG normalization of texture references
    #[must_use]
    pub fn with_png_textures(mut self, enabled: bool) -> Self {
        self.emit.normalize_textures_to_png = enabled;
        self
    }
}

/// Already-extracted data of one model
#[derive(Debug, Clone, Copy)]
pub struct DedupInput<'a> {
    /// Geometry file name used in the report header
    pub source_name: &'a str,
    /// Full geometry (OBJ) text
    pub geometry: &'a str,
    /// Per-submesh material records
    pub materials: &'a [Material],
}

impl<'a> DedupInput<'a> {
    /// Bundle the inputs of one run
    pub const fn new(source_name: &'a str, geometry: &'a str, materials: &'a [Material]) -> Self {
        Self {
            source_name,
            geometry,
            materials,
        }
    }
}

/// Counters describing one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Material records supplied
    pub input_materials: usize,
    /// Distinct materials written to the library
    pub distinct_materials: usize,
    /// Names folded into another material
    pub duplicate_names: usize,
    /// `usemtl` lines in the geometry
    pub material_uses: usize,
    /// `usemtl` lines pointed at a different name
    pub redirected_uses: usize,
}

/// Every text produced for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutput {
    /// Rewritten geometry text
    pub geometry: String,
    /// Deduplicated material library text
    pub library: String,
    /// Duplicate report
    pub report: DuplicateReport,
    /// Run counters
    pub stats: DedupStats,
}

/// Runs the full deduplication of one model
#[derive(Debug, Clone)]
pub struct Deduplicator {
    options: DedupOptions,
}

impl Deduplicator {
    /// Create a pipeline with explicit options
    pub const fn new(options: DedupOptions) -> Self {
        Self { options }
    }

    /// Options this pipeline runs with
    pub const fn options(&self) -> &DedupOptions {
        &self.options
    }

    /// Deduplicate one model
    ///
    /// Fails without producing any text when a reference cannot be resolved
    /// or a material name is ambiguous.
    pub fn run(&self, input: &DedupInput<'_>) -> DedupResult<DedupOutput> {
        let selection = CanonicalSelector::select(MaterialGrouper::group(input.materials));
        let names = NameIndex::build(&selection)?;

        let geometry = ReferenceRewriter::new(&names, &self.options.library_file).rewrite(input.geometry)?;
        let library = MtlWriter::new(self.options.emit).write(&selection);
        let report = DuplicateReport::build(input.source_name, &selection);

        let stats = DedupStats {
            input_materials: input.materials.len(),
            distinct_materials: selection.distinct_count(),
            duplicate_names: selection.duplicate_names().len(),
            material_uses: geometry.material_uses(),
            redirected_uses: geometry.redirected_uses(),
        };

        log::debug!(
            "{}: {} materials -> {} distinct, {} of {} references redirected",
            input.source_name,
            stats.input_materials,
            stats.distinct_materials,
            stats.redirected_uses,
            stats.material_uses
        );

        Ok(DedupOutput {
            geometry: geometry.to_text(),
            library,
            report,
            stats,
        })
    }
}
