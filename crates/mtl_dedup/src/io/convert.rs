//! Single-model conversion driver

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConvertError, ConvertResult};
use super::importer::ImporterRegistry;
use super::textures::{TextureExportSummary, TextureExporter};
use super::writer::{OutputPaths, OutputWriter};
use crate::config::ConversionConfig;
use crate::pipeline::{DedupInput, DedupOptions, DedupStats, Deduplicator};

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Input model
    pub model: PathBuf,
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Deduplication counters
    pub stats: DedupStats,
    /// Texture export outcome
    pub textures: TextureExportSummary,
    /// Intermediate files removed
    pub removed_intermediates: usize,
}

/// Converts models one at a time
///
/// Each call to [`Converter::convert`] is independent; no data from one
/// model is visible while converting another.
pub struct Converter {
    config: ConversionConfig,
    registry: ImporterRegistry,
}

impl Converter {
    /// Converter with the default importers
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_registry(config, ImporterRegistry::new())
    }

    /// Converter with a custom importer registry
    pub fn with_registry(config: ConversionConfig, registry: ImporterRegistry) -> Self {
        Self { config, registry }
    }

    /// Active configuration
    pub const fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert one model into a deduplicated OBJ/MTL pair
    ///
    /// Outputs are written only after deduplication succeeded. Texture
    /// problems are reported in the summary and do not fail the conversion.
    pub fn convert(&self, model: &Path) -> ConvertResult<ConversionSummary> {
        let display_name = model.file_name().map_or_else(
            || model.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        let importer = self.registry.resolve(model, self.config.force_conversion)?;
        log::info!("Converting {display_name} with the {} importer", importer.name());
        let imported = importer.import(model)?;

        let model_dir = model.parent().unwrap_or_else(|| Path::new(""));
        let output_dir = self.config.output_dir_for(model_dir);
        if !output_dir.as_os_str().is_empty() {
            fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;
        }
        let paths = OutputPaths::for_model(model, output_dir);

        log::info!("Filtering out duplicate materials from {display_name}");
        let options = DedupOptions {
            library_file: paths.library_file_name(),
            emit: self.config.emit_options(),
        };
        let geometry_name = paths.geometry_file_name();
        let output = Deduplicator::new(options).run(&DedupInput::new(
            &geometry_name,
            &imported.geometry,
            &imported.materials,
        ))?;
        log::info!(
            "{}: {} materials, {} distinct",
            display_name,
            output.stats.input_materials,
            output.stats.distinct_materials
        );

        let written =
            OutputWriter::new(&imported.sources).write(&paths, &output, self.config.keep_intermediate)?;

        log::info!("Extracting textures");
        let textures = TextureExporter::new(self.config.normalize_textures_to_png).export(
            &imported.materials,
            &imported.texture_root,
            output_dir,
        );
        if !textures.is_complete() {
            log::warn!(
                "{display_name}: {} textures missing, {} failed",
                textures.missing.len(),
                textures.failed.len()
            );
        }

        let removed_intermediates = if self.config.keep_intermediate {
            0
        } else {
            OutputWriter::remove_intermediates(&imported.intermediates)
        };

        log::info!("Exported {display_name} to {}", paths.geometry.display());

        Ok(ConversionSummary {
            model: model.to_path_buf(),
            written,
            stats: output.stats,
            textures,
            removed_intermediates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("scene.usdz");
        fs::write(&model, "usemtl a\n").unwrap();

        let converter = Converter::new(ConversionConfig::default());
        assert!(matches!(
            converter.convert(&model),
            Err(ConvertError::UnsupportedInput { .. })
        ));
        assert!(!dir.path().join("scene.obj").exists());
    }

    #[test]
    fn test_forced_input_goes_through_wavefront_importer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("raw.mtl"), "newmtl a\nnewmtl b\n").unwrap();
        let model = dir.path().join("scene.export");
        fs::write(&model, "mtllib raw.mtl\nusemtl b\nf 1 2 3").unwrap();

        let converter = Converter::new(ConversionConfig::default().with_force_conversion(true));
        let summary = converter.convert(&model).unwrap();

        assert_eq!(summary.stats.distinct_materials, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("scene.obj")).unwrap(),
            "mtllib scene.mtl\nusemtl a\nf 1 2 3"
        );
    }
}
