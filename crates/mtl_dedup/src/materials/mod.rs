//! Wavefront material model, parsing and emission

mod material;
mod mtl_parser;
mod mtl_writer;

pub use material::{Material, MaterialKey, RenderEquivalence, TextureSlot};
pub use mtl_parser::{MtlParseError, MtlParser};
pub use mtl_writer::{normalize_texture_extension, EmitOptions, MtlWriter};
