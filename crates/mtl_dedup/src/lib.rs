//! # MTL Dedup
//!
//! Material deduplication for Wavefront OBJ/MTL pairs produced by naive exporters.
//!
//! ## Features
//!
//! - **Grouping**: Partition materials into classes that render identically
//! - **Canonical Names**: Pick one deterministic representative per class
//! - **Reference Rewriting**: Point every `usemtl` line at a canonical name
//! - **Library Emission**: Write a `.mtl` file without redundant definitions
//! - **Reporting**: Human-readable list of the duplicates that were folded
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mtl_dedup::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let materials = MtlParser::parse(&std::fs::read_to_string("model_raw.mtl")?)?;
//!     let geometry = std::fs::read_to_string("model_raw.obj")?;
//!
//!     let input = DedupInput::new("model.obj", &geometry, &materials);
//!     let output = Deduplicator::new(DedupOptions::new("model.mtl")).run(&input)?;
//!
//!     std::fs::write("model.obj", output.geometry)?;
//!     std::fs::write("model.mtl", output.library)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod dedup;
pub mod foundation;
pub mod geometry;
pub mod io;
pub mod materials;

mod error;
mod pipeline;

pub use error::{DedupError, DedupResult};
pub use pipeline::{DedupInput, DedupOptions, DedupOutput, DedupStats, Deduplicator};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        DedupError, DedupInput, DedupOptions, DedupOutput, Deduplicator,
        config::{Config, ConfigError, ConversionConfig},
        dedup::{CanonicalSelector, DuplicateReport, MaterialGrouper, Selection},
        geometry::{GeometryLine, ReferenceRewriter},
        materials::{EmitOptions, Material, MtlParser, MtlWriter, RenderEquivalence, TextureSlot},
    };
}
