//! Configuration system
//!
//! Conversion settings are plain values handed to the pipeline and the glue
//! layer; nothing in the library reads them from the environment. Files can
//! be TOML or RON, picked by extension.

use std::path::{Path, PathBuf};

pub use serde::{Deserialize, Serialize};

use crate::materials::EmitOptions;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Conversion Configuration
///
/// Settings for converting one batch of models. Command line flags are
/// merged on top of a loaded file with [`ConversionConfig::merge_flags`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Rewrite texture references to `.png` and convert the images
    pub normalize_textures_to_png: bool,
    /// Try the Wavefront importer on unrecognized input types
    pub force_conversion: bool,
    /// Keep intermediate files and write the duplicate report
    pub keep_intermediate: bool,
    /// Where outputs go; `None` means next to each input
    pub output_directory: Option<PathBuf>,
}

impl Config for ConversionConfig {}

impl ConversionConfig {
    /// Turn on PNG normalization
    #[must_use]
    pub fn with_png_textures(mut self, enabled: bool) -> Self {
        self.normalize_textures_to_png = enabled;
        self
    }

    /// Turn on forced conversion of unrecognized inputs
    #[must_use]
    pub fn with_force_conversion(mut self, enabled: bool) -> Self {
        self.force_conversion = enabled;
        self
    }

    /// Keep intermediate files
    #[must_use]
    pub fn with_keep_intermediate(mut self, enabled: bool) -> Self {
        self.keep_intermediate = enabled;
        self
    }

    /// Write outputs to `dir`
    #[must_use]
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }

    /// Apply command line flags; a set flag always wins over the file value
    #[must_use]
    pub fn merge_flags(
        mut self,
        png: bool,
        force: bool,
        keep_intermediate: bool,
        output_directory: Option<PathBuf>,
    ) -> Self {
        self.normalize_textures_to_png |= png;
        self.force_conversion |= force;
        self.keep_intermediate |= keep_intermediate;
        if output_directory.is_some() {
            self.output_directory = output_directory;
        }
        self
    }

    /// Library emission options derived from this configuration
    pub const fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            normalize_textures_to_png: self.normalize_textures_to_png,
        }
    }

    /// Output directory for a model located in `model_dir`
    pub fn output_dir_for<'a>(&'a self, model_dir: &'a Path) -> &'a Path {
        self.output_directory.as_deref().unwrap_or(model_dir)
    }
}
