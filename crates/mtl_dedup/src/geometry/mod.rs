//! Geometry (OBJ) material reference handling
//!
//! Classification of lines and the rewrite rule live in separate modules so
//! each can be tested on its own.

mod line;
mod rewriter;

pub use line::{GeometryLine, LIBRARY_KEYWORD, USE_KEYWORD};
pub use rewriter::{LineRewrite, ReferenceRewriter, RewrittenGeometry};
