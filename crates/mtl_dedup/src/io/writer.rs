//! Output persistence

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::error::{ConvertError, ConvertResult};
use super::textures::same_file;
use crate::pipeline::DedupOutput;

/// Suffix used when the plain output name would replace the input model
const FALLBACK_SUFFIX: &str = "_dedup";

/// Suffix of the duplicate report file
const REPORT_SUFFIX: &str = "_duplicates.txt";

/// Where the outputs of one model go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Rewritten geometry (`<base>.obj`)
    pub geometry: PathBuf,
    /// Deduplicated library (`<base>.mtl`)
    pub library: PathBuf,
    /// Duplicate report (`<base>_duplicates.txt`)
    pub report: PathBuf,
}

impl OutputPaths {
    /// Output paths for `model` inside `output_dir`
    ///
    /// The base name is the model's file stem. When `<base>.obj` would be the
    /// model itself (an OBJ converted in place), `_dedup` is appended.
    pub fn for_model(model: &Path, output_dir: &Path) -> Self {
        let stem = model
            .file_stem()
            .map_or_else(|| "model".to_string(), |s| s.to_string_lossy().into_owned());

        let plain = Self::with_base(output_dir, &stem);
        if same_file(&plain.geometry, model) {
            Self::with_base(output_dir, &format!("{stem}{FALLBACK_SUFFIX}"))
        } else {
            plain
        }
    }

    fn with_base(output_dir: &Path, base: &str) -> Self {
        Self {
            geometry: output_dir.join(format!("{base}.obj")),
            library: output_dir.join(format!("{base}.mtl")),
            report: output_dir.join(format!("{base}{REPORT_SUFFIX}")),
        }
    }

    /// File name to put in `mtllib` lines
    pub fn library_file_name(&self) -> String {
        file_name(&self.library)
    }

    /// File name of the geometry output, used in the report header
    pub fn geometry_file_name(&self) -> String {
        file_name(&self.geometry)
    }
}

/// Write `contents` to a temporary file in the directory of `target`
fn stage(target: &Path, contents: &str) -> ConvertResult<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| ConvertError::io(file.path(), e))?;
    Ok(file)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Writes finished outputs to disk
pub struct OutputWriter<'a> {
    protected: &'a [PathBuf],
}

impl<'a> OutputWriter<'a> {
    /// Writer that refuses to replace any of `protected` (the input files)
    pub const fn new(protected: &'a [PathBuf]) -> Self {
        Self { protected }
    }

    /// Write geometry, library and optionally the report
    ///
    /// Every target is checked against the inputs before anything is
    /// written. Texts are staged in temporary files next to their targets
    /// and moved into place only once all of them were written; if moving
    /// one fails, the outputs already moved by this call are removed again.
    pub fn write(&self, paths: &OutputPaths, output: &DedupOutput, write_report: bool) -> ConvertResult<Vec<PathBuf>> {
        let report = write_report.then(|| output.report.render_trimmed());

        let mut targets: Vec<(&Path, &str)> = vec![
            (paths.geometry.as_path(), output.geometry.as_str()),
            (paths.library.as_path(), output.library.as_str()),
        ];
        if let Some(report) = report.as_deref() {
            targets.push((paths.report.as_path(), report));
        }

        for (target, _) in &targets {
            if let Some(input) = self.protected.iter().find(|input| same_file(input, target)) {
                return Err(ConvertError::OutputOverwritesInput { path: input.clone() });
            }
        }

        let staged = targets
            .into_iter()
            .map(|(target, contents)| stage(target, contents).map(|file| (target, file)))
            .collect::<ConvertResult<Vec<_>>>()?;

        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (target, file) in staged {
            log::info!("Writing {}", target.display());
            if let Err(e) = file.persist(target) {
                Self::roll_back(&written);
                return Err(ConvertError::io(target, e.error));
            }
            written.push(target.to_path_buf());
        }

        Ok(written)
    }

    fn roll_back(written: &[PathBuf]) {
        for path in written {
            if let Err(e) = fs::remove_file(path) {
                log::warn!("Couldn't remove partial output {}: {e}", path.display());
            }
        }
    }

    /// Delete intermediate files, returning how many were removed
    ///
    /// Failures are logged; leftover intermediates never fail a conversion.
    pub fn remove_intermediates(intermediates: &[PathBuf]) -> usize {
        intermediates
            .iter()
            .filter(|path| match fs::remove_file(path) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Couldn't delete {}: {e}", path.display());
                    false
                }
            })
            .count()
    }
}
