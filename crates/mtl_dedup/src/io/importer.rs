//! Model importers
//!
//! An importer turns an input model into geometry text plus the per-submesh
//! material records the deduplication core works on.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConvertError, ConvertResult};
use crate::geometry::GeometryLine;
use crate::materials::{Material, MtlParser};

/// Data handed from an importer to the deduplication core
#[derive(Debug, Clone, Default)]
pub struct ImportedModel {
    /// Full geometry (OBJ) text
    pub geometry: String,
    /// Material records in library order
    pub materials: Vec<Material>,
    /// Directory texture references are relative to
    pub texture_root: PathBuf,
    /// Files the import read from; outputs must never replace these
    pub sources: Vec<PathBuf>,
    /// Temporary files created during import, removed unless kept
    pub intermediates: Vec<PathBuf>,
}

/// Source of geometry text and material records
pub trait ModelImporter {
    /// Human-readable importer name for logs
    fn name(&self) -> &'static str;

    /// Lowercase file extensions this importer accepts
    fn extensions(&self) -> &[&'static str];

    /// Import one model file
    fn import(&self, model: &Path) -> ConvertResult<ImportedModel>;
}

/// Imports Wavefront OBJ files and the material libraries they reference
#[derive(Debug, Clone, Copy, Default)]
pub struct WavefrontImporter;

impl WavefrontImporter {
    /// Library files named by an `mtllib` argument
    ///
    /// The whole argument is tried first so names with spaces work; otherwise
    /// it is split on whitespace, as OBJ allows several libraries per line.
    fn library_paths(argument: &str, model_dir: &Path) -> Vec<PathBuf> {
        let whole = model_dir.join(argument);
        if whole.is_file() {
            return vec![whole];
        }
        argument.split_whitespace().map(|name| model_dir.join(name)).collect()
    }
}

impl ModelImporter for WavefrontImporter {
    fn name(&self) -> &'static str {
        "Wavefront OBJ"
    }

    fn extensions(&self) -> &[&'static str] {
        &["obj"]
    }

    fn import(&self, model: &Path) -> ConvertResult<ImportedModel> {
        let geometry = fs::read_to_string(model).map_err(|e| ConvertError::io(model, e))?;
        let model_dir = model.parent().unwrap_or_else(|| Path::new("")).to_path_buf();

        let mut imported = ImportedModel {
            texture_root: model_dir.clone(),
            sources: vec![model.to_path_buf()],
            ..Default::default()
        };

        let libraries: Vec<PathBuf> = geometry
            .lines()
            .filter_map(|line| match GeometryLine::classify(line) {
                GeometryLine::LibraryReference(argument) => Some(argument),
                _ => None,
            })
            .flat_map(|argument| Self::library_paths(argument, &model_dir))
            .collect();

        if libraries.is_empty() {
            log::warn!("{} references no material library", model.display());
        }

        for library in libraries {
            if imported.sources.contains(&library) {
                continue;
            }
            let contents = fs::read_to_string(&library).map_err(|e| ConvertError::io(&library, e))?;
            let materials = MtlParser::parse(&contents).map_err(|source| ConvertError::Parse {
                path: library.clone(),
                source,
            })?;
            log::debug!("Read {} materials from {}", materials.len(), library.display());
            imported.materials.extend(materials);
            imported.sources.push(library);
        }

        imported.geometry = geometry;
        Ok(imported)
    }
}

/// Importers keyed by file extension
pub struct ImporterRegistry {
    importers: Vec<Box<dyn ModelImporter>>,
    fallback: Box<dyn ModelImporter>,
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ImporterRegistry {
    /// Registry with the Wavefront importer, also used as forced fallback
    pub fn new() -> Self {
        Self {
            importers: vec![Box::new(WavefrontImporter)],
            fallback: Box::new(WavefrontImporter),
        }
    }

    /// Add an importer; later registrations win for shared extensions
    pub fn register(&mut self, importer: Box<dyn ModelImporter>) {
        self.importers.insert(0, importer);
    }

    /// Importer registered for `extension` (case-insensitive)
    pub fn find(&self, extension: &str) -> Option<&dyn ModelImporter> {
        let extension = extension.to_ascii_lowercase();
        self.importers
            .iter()
            .find(|importer| importer.extensions().iter().any(|ext| *ext == extension))
            .map(|importer| importer.as_ref())
    }

    /// Importer for a model path
    ///
    /// With `force` an unrecognized extension falls back to the Wavefront
    /// importer instead of failing.
    pub fn resolve(&self, model: &Path, force: bool) -> ConvertResult<&dyn ModelImporter> {
        let extension = model.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

        match self.find(extension) {
            Some(importer) => Ok(importer),
            None if force => {
                log::warn!(
                    "{}: no importer for '{}', trying {}",
                    model.display(),
                    extension,
                    self.fallback.name()
                );
                Ok(self.fallback.as_ref())
            }
            None => Err(ConvertError::UnsupportedInput {
                path: model.to_path_buf(),
            }),
        }
    }
}
