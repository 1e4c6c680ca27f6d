//! OBJ line classification

/// Keyword of a material library reference line
pub const LIBRARY_KEYWORD: &str = "mtllib";

/// Keyword of a material use line
pub const USE_KEYWORD: &str = "usemtl";

/// What a geometry line means for material references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryLine<'a> {
    /// `mtllib <file>...`; the argument is the rest of the line, trimmed
    LibraryReference(&'a str),
    /// `usemtl <name>`; the name is the rest of the line, trimmed
    MaterialUse(&'a str),
    /// `mtllib` or `usemtl` without the expected trailing token
    Malformed,
    /// Anything else
    Other,
}

impl<'a> GeometryLine<'a> {
    /// Classify one line of OBJ text
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim_start();

        if let Some(rest) = keyword_argument(trimmed, LIBRARY_KEYWORD) {
            return if rest.is_empty() { Self::Malformed } else { Self::LibraryReference(rest) };
        }

        if let Some(rest) = keyword_argument(trimmed, USE_KEYWORD) {
            return if rest.is_empty() { Self::Malformed } else { Self::MaterialUse(rest) };
        }

        Self::Other
    }

    /// Whether this line carries a material reference
    pub const fn is_reference(&self) -> bool {
        matches!(self, Self::LibraryReference(_) | Self::MaterialUse(_))
    }
}

/// Trimmed argument text when `line` starts with `keyword` as a whole token
fn keyword_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    match rest.chars().next() {
        None => Some(""),
        Some(c) if c.is_whitespace() => Some(rest.trim()),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_reference() {
        assert_eq!(
            GeometryLine::classify("mtllib model.mtl"),
            GeometryLine::LibraryReference("model.mtl")
        );
        assert_eq!(
            GeometryLine::classify("  mtllib a.mtl b.mtl"),
            GeometryLine::LibraryReference("a.mtl b.mtl")
        );
        assert!(GeometryLine::LibraryReference("x.mtl").is_reference());
    }

    #[test]
    fn test_material_use_keeps_full_name() {
        assert_eq!(GeometryLine::classify("usemtl red"), GeometryLine::MaterialUse("red"));
        assert_eq!(
            GeometryLine::classify("usemtl Car Paint 01  "),
            GeometryLine::MaterialUse("Car Paint 01")
        );
        assert_eq!(GeometryLine::classify("\tusemtl x"), GeometryLine::MaterialUse("x"));
    }

    #[test]
    fn test_missing_token_is_malformed() {
        assert_eq!(GeometryLine::classify("usemtl"), GeometryLine::Malformed);
        assert_eq!(GeometryLine::classify("usemtl   "), GeometryLine::Malformed);
        assert_eq!(GeometryLine::classify("mtllib"), GeometryLine::Malformed);
        assert!(!GeometryLine::Malformed.is_reference());
    }

    #[test]
    fn test_other_lines() {
        for line in ["v 1 2 3", "f 1 2 3", "# usemtl red", "", "usemtlred", "mtllibs x", "g usemtl"] {
            assert_eq!(GeometryLine::classify(line), GeometryLine::Other, "line: {line:?}");
        }
    }
}
