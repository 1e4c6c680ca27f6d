//! Material reference rewriting

use super::line::{GeometryLine, LIBRARY_KEYWORD, USE_KEYWORD};
use crate::dedup::NameIndex;
use crate::error::{DedupError, DedupResult};

/// Rewritten geometry, line by line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenGeometry {
    lines: Vec<String>,
    library_references: usize,
    material_uses: usize,
    redirected_uses: usize,
}

impl RewrittenGeometry {
    /// Output lines in input order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of `mtllib` lines retargeted
    pub const fn library_references(&self) -> usize {
        self.library_references
    }

    /// Number of `usemtl` lines seen
    pub const fn material_uses(&self) -> usize {
        self.material_uses
    }

    /// Number of `usemtl` lines whose name changed
    pub const fn redirected_uses(&self) -> usize {
        self.redirected_uses
    }

    /// Lines joined with `\n`
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Result of applying the rewrite rule to one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRewrite<'a> {
    /// The line passes through as written
    Unchanged,
    /// `mtllib` retargeted at the new library
    Library(String),
    /// `usemtl` pointed at its canonical name
    MaterialUse {
        /// Rewritten line
        line: String,
        /// Name the reference resolved to
        canonical: &'a str,
        /// Whether the canonical name differs from the referenced one
        redirected: bool,
    },
}

impl LineRewrite<'_> {
    /// Replacement text, `None` when the line is unchanged
    pub fn into_line(self) -> Option<String> {
        match self {
            Self::Unchanged => None,
            Self::Library(line) | Self::MaterialUse { line, .. } => Some(line),
        }
    }
}

/// Points material references at canonical names and the new library
pub struct ReferenceRewriter<'i, 'a> {
    names: &'i NameIndex<'a>,
    library_file: &'i str,
}

impl<'i, 'a> ReferenceRewriter<'i, 'a> {
    /// Create a rewriter resolving through `names` and referencing `library_file`
    pub const fn new(names: &'i NameIndex<'a>, library_file: &'i str) -> Self {
        Self { names, library_file }
    }

    /// Rewrite a single classified line
    ///
    /// `line_number` is only used for error reporting.
    pub fn rewrite_line(&self, line: GeometryLine<'_>, line_number: usize) -> DedupResult<LineRewrite<'a>> {
        match line {
            GeometryLine::LibraryReference(_) => Ok(LineRewrite::Library(format!(
                "{LIBRARY_KEYWORD} {}",
                self.library_file
            ))),
            GeometryLine::MaterialUse(name) => {
                let canonical = self.resolve(name, line_number)?;
                Ok(LineRewrite::MaterialUse {
                    line: format!("{USE_KEYWORD} {canonical}"),
                    canonical,
                    redirected: canonical != name,
                })
            }
            GeometryLine::Malformed | GeometryLine::Other => Ok(LineRewrite::Unchanged),
        }
    }

    /// Rewrite a whole geometry text
    ///
    /// Fails on the first `usemtl` whose name cannot be resolved; nothing
    /// is produced in that case.
    pub fn rewrite(&self, geometry: &str) -> DedupResult<RewrittenGeometry> {
        let mut output = RewrittenGeometry::default();

        for (index, line) in geometry.lines().enumerate() {
            let line_number = index + 1;
            let kind = GeometryLine::classify(line);
            if kind == GeometryLine::Malformed {
                log::debug!("Line {line_number}: malformed reference '{line}' left unchanged");
            }

            let rewritten = self.rewrite_line(kind, line_number)?;
            match &rewritten {
                LineRewrite::Library(_) => output.library_references += 1,
                LineRewrite::MaterialUse { redirected, .. } => {
                    output.material_uses += 1;
                    if *redirected {
                        output.redirected_uses += 1;
                    }
                }
                LineRewrite::Unchanged => {}
            }

            output.lines.push(rewritten.into_line().unwrap_or_else(|| line.to_string()));
        }

        Ok(output)
    }

    fn resolve(&self, name: &str, line_number: usize) -> DedupResult<&'a str> {
        self.names
            .resolve(name)
            .ok_or_else(|| DedupError::UnresolvedMaterialReference {
                name: name.to_string(),
                line: line_number,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::{CanonicalSelector, MaterialGrouper};
    use crate::foundation::math::Vec3;
    use crate::materials::Material;

    fn red_red_blue() -> Vec<Material> {
        vec![
            Material::new("A").with_diffuse(Vec3::new(1.0, 0.0, 0.0)),
            Material::new("B").with_diffuse(Vec3::new(1.0, 0.0, 0.0)),
            Material::new("C").with_diffuse(Vec3::new(0.0, 0.0, 1.0)),
        ]
    }

    #[test]
    fn test_rewrite_line_rule() {
        let materials = red_red_blue();
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let names = NameIndex::build(&selection).unwrap();
        let rewriter = ReferenceRewriter::new(&names, "out.mtl");

        assert_eq!(
            rewriter.rewrite_line(GeometryLine::LibraryReference("in.mtl"), 1),
            Ok(LineRewrite::Library("mtllib out.mtl".to_string()))
        );
        assert_eq!(
            rewriter.rewrite_line(GeometryLine::MaterialUse("B"), 2),
            Ok(LineRewrite::MaterialUse {
                line: "usemtl A".to_string(),
                canonical: "A",
                redirected: true,
            })
        );
        assert_eq!(
            rewriter.rewrite_line(GeometryLine::MaterialUse("C"), 5),
            Ok(LineRewrite::MaterialUse {
                line: "usemtl C".to_string(),
                canonical: "C",
                redirected: false,
            })
        );
        assert_eq!(
            rewriter.rewrite_line(GeometryLine::MaterialUse("Z"), 7),
            Err(DedupError::UnresolvedMaterialReference {
                name: "Z".to_string(),
                line: 7,
            })
        );
        assert_eq!(rewriter.rewrite_line(GeometryLine::Other, 3), Ok(LineRewrite::Unchanged));
        assert_eq!(rewriter.rewrite_line(GeometryLine::Malformed, 4), Ok(LineRewrite::Unchanged));
        assert_eq!(LineRewrite::Unchanged.into_line(), None);
    }

    #[test]
    fn test_rewrite_document() {
        let materials = red_red_blue();
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let names = NameIndex::build(&selection).unwrap();

        let geometry = "# exported\nmtllib model_raw.mtl\no Cube\nv 0 0 0\nusemtl B\nf 1 2 3\nusemtl C\nusemtl A\nusemtl\nf 3 2 1";
        let rewritten = ReferenceRewriter::new(&names, "model.mtl").rewrite(geometry).unwrap();

        assert_eq!(
            rewritten.to_text(),
            "# exported\nmtllib model.mtl\no Cube\nv 0 0 0\nusemtl A\nf 1 2 3\nusemtl C\nusemtl A\nusemtl\nf 3 2 1"
        );
        assert_eq!(rewritten.library_references(), 1);
        assert_eq!(rewritten.material_uses(), 3);
        assert_eq!(rewritten.redirected_uses(), 1);
    }

    #[test]
    fn test_every_library_line_is_retargeted() {
        let names = NameIndex::default();
        let rewritten = ReferenceRewriter::new(&names, "new.mtl")
            .rewrite("mtllib a.mtl\nv 1 1 1\nmtllib b.mtl c.mtl")
            .unwrap();

        assert_eq!(rewritten.lines(), ["mtllib new.mtl", "v 1 1 1", "mtllib new.mtl"]);
    }

    #[test]
    fn test_unresolved_reference_fails() {
        let materials = red_red_blue();
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let names = NameIndex::build(&selection).unwrap();

        let err = ReferenceRewriter::new(&names, "model.mtl")
            .rewrite("mtllib x.mtl\nusemtl A\nusemtl Missing\nf 1 2 3")
            .unwrap_err();

        assert_eq!(
            err,
            DedupError::UnresolvedMaterialReference {
                name: "Missing".to_string(),
                line: 3,
            }
        );
    }

    #[test]
    fn test_resolution_is_exact() {
        let materials = red_red_blue();
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let names = NameIndex::build(&selection).unwrap();

        assert!(ReferenceRewriter::new(&names, "m.mtl").rewrite("usemtl b").is_err());
    }
}
