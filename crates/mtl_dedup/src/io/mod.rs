//! File-system glue around the deduplication core
//!
//! Importing models, exporting textures and persisting outputs. The core in
//! [`crate::pipeline`] never touches the file system; this module does all of
//! it, and only after the core has produced every text.

mod convert;
mod error;
mod importer;
mod textures;
mod writer;

pub use convert::{ConversionSummary, Converter};
pub use error::{ConvertError, ConvertResult};
pub use importer::{ImportedModel, ImporterRegistry, ModelImporter, WavefrontImporter};
pub use textures::{convert_to_png, TextureExportSummary, TextureExporter};
pub use writer::{OutputPaths, OutputWriter};
