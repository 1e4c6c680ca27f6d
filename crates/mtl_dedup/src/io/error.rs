//! Conversion errors

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::error::DedupError;
use crate::materials::MtlParseError;

/// Failures while converting one model file
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Reading, writing or removing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// A material library could not be parsed
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Library file
        path: PathBuf,
        /// Parser error
        source: MtlParseError,
    },

    /// Deduplication failed; nothing was written
    #[error("Deduplication failed: {0}")]
    Dedup(#[from] DedupError),

    /// No importer handles this file type
    #[error("Unsupported input type: {}", path.display())]
    UnsupportedInput {
        /// Input model
        path: PathBuf,
    },

    /// A texture could not be decoded or encoded
    #[error("Texture conversion failed for {}: {source}", path.display())]
    Texture {
        /// Texture file
        path: PathBuf,
        /// Image error
        source: image::ImageError,
    },

    /// An output path points at one of the input files
    #[error("Refusing to overwrite input file {}", path.display())]
    OutputOverwritesInput {
        /// Input file that would be replaced
        path: PathBuf,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ConvertError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for `Result<T, ConvertError>`
pub type ConvertResult<T> = Result<T, ConvertError>;
