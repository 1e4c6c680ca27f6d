//! Texture export
//!
//! Places every texture a library references next to the written library.
//! With PNG normalization, non-PNG images are decoded and re-encoded so the
//! files match the `.png` references [`crate::materials::MtlWriter`] emits.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::error::{ConvertError, ConvertResult};
use crate::materials::{normalize_texture_extension, Material};

/// Outcome of one texture export pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureExportSummary {
    /// Files copied unchanged
    pub copied: usize,
    /// Files converted to PNG
    pub converted: usize,
    /// Files already in place
    pub unchanged: usize,
    /// Referenced files that do not exist
    pub missing: Vec<PathBuf>,
    /// Files that exist but could not be exported
    pub failed: Vec<PathBuf>,
}

impl TextureExportSummary {
    /// Whether every referenced texture ended up in place
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.failed.is_empty()
    }
}

/// Copies or converts referenced textures
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureExporter {
    normalize_to_png: bool,
}

impl TextureExporter {
    /// Create an exporter; `normalize_to_png` must match the library options
    pub const fn new(normalize_to_png: bool) -> Self {
        Self { normalize_to_png }
    }

    /// Export the textures referenced by `materials`
    ///
    /// References are resolved against `source_root` and written under
    /// `target_dir` keeping their relative layout. Problems with single
    /// textures are logged and listed in the summary, never fatal.
    pub fn export<'m>(
        &self,
        materials: impl IntoIterator<Item = &'m Material>,
        source_root: &Path,
        target_dir: &Path,
    ) -> TextureExportSummary {
        let references: BTreeSet<&str> = materials
            .into_iter()
            .flat_map(|material| material.textures.values().map(String::as_str))
            .collect();

        let mut summary = TextureExportSummary::default();

        for reference in references {
            let source = source_root.join(reference);
            if !source.is_file() {
                log::warn!("Texture not found: {}", source.display());
                summary.missing.push(source);
                continue;
            }

            let result = if self.normalize_to_png && !is_png(&source) {
                let target = target_dir.join(normalize_texture_extension(reference));
                convert_to_png(&source, &target).map(|()| summary.converted += 1)
            } else {
                let target = target_dir.join(reference);
                if same_file(&source, &target) {
                    summary.unchanged += 1;
                    Ok(())
                } else {
                    copy_file(&source, &target).map(|()| summary.copied += 1)
                }
            };

            if let Err(e) = result {
                log::warn!("Couldn't export texture: {e}");
                summary.failed.push(source);
            }
        }

        summary
    }
}

/// Decode `source` and write it as PNG to `target`
pub fn convert_to_png(source: &Path, target: &Path) -> ConvertResult<()> {
    create_parent(target)?;
    let image = image::open(source).map_err(|e| ConvertError::Texture {
        path: source.to_path_buf(),
        source: e,
    })?;
    image
        .save_with_format(target, ImageFormat::Png)
        .map_err(|e| ConvertError::Texture {
            path: target.to_path_buf(),
            source: e,
        })?;
    log::debug!("Converted {} -> {}", source.display(), target.display());
    Ok(())
}

fn copy_file(source: &Path, target: &Path) -> ConvertResult<()> {
    create_parent(target)?;
    fs::copy(source, target).map_err(|e| ConvertError::io(target, e))?;
    log::debug!("Copied {} -> {}", source.display(), target.display());
    Ok(())
}

fn create_parent(path: &Path) -> ConvertResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Whether two paths name the same file, resolving links when both exist
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
