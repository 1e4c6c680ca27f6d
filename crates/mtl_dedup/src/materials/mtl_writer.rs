//! MTL (Material Template Library) writer
//!
//! Serializes the canonical material of every group. Duplicate definitions
//! are never written; geometry has already been pointed at canonical names.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::dedup::Selection;
use crate::foundation::math::Vec3;

/// Extension texture references are normalized to
const PNG_EXTENSION: &str = "png";

/// Options for [`MtlWriter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Rewrite every texture reference to a `.png` file name
    pub normalize_textures_to_png: bool,
}

/// Writes deduplicated material libraries
#[derive(Debug, Clone, Copy, Default)]
pub struct MtlWriter {
    options: EmitOptions,
}

impl MtlWriter {
    /// Create a writer with the given options
    pub const fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Library text for a selection
    ///
    /// Blocks follow group order (most duplicated first). An empty selection
    /// yields an empty string.
    pub fn write(&self, selection: &Selection<'_, Material>) -> String {
        let mut out = String::new();

        for material in selection.canonical_members() {
            if selection.is_duplicate(&material.name) {
                log::warn!("Canonical material '{}' is also listed as a duplicate, skipped", material.name);
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            self.write_material(material, &mut out);
        }

        out
    }

    /// Append one `newmtl` block
    pub fn write_material(&self, material: &Material, out: &mut String) {
        out.push_str(&MaterialBlock {
            material,
            options: self.options,
        }
        .to_string());
    }
}

/// One `newmtl` block in MTL syntax
struct MaterialBlock<'a> {
    material: &'a Material,
    options: EmitOptions,
}

impl fmt::Display for MaterialBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let material = self.material;

        writeln!(f, "newmtl {}", material.name)?;
        write_color(f, "Ka", &material.ambient)?;
        write_color(f, "Kd", &material.diffuse)?;
        write_color(f, "Ks", &material.specular)?;
        write_color(f, "Ke", &material.emission)?;
        writeln!(f, "Ns {}", material.specular_exponent)?;
        writeln!(f, "Ni {}", material.optical_density)?;
        writeln!(f, "d {}", material.dissolve)?;
        writeln!(f, "illum {}", material.illumination_model)?;

        for (slot, path) in &material.textures {
            if self.options.normalize_textures_to_png {
                writeln!(f, "{slot} {}", normalize_texture_extension(path))?;
            } else {
                writeln!(f, "{slot} {path}")?;
            }
        }

        for (keyword, argument) in &material.other_statements {
            if argument.is_empty() {
                writeln!(f, "{keyword}")?;
            } else {
                writeln!(f, "{keyword} {argument}")?;
            }
        }

        Ok(())
    }
}

fn write_color(f: &mut fmt::Formatter<'_>, keyword: &str, color: &Vec3) -> fmt::Result {
    writeln!(f, "{keyword} {} {} {}", color.x, color.y, color.z)
}

/// Texture reference with its extension replaced by `.png`
///
/// Paths without an extension get `.png` appended; paths that already end in
/// `.png` (any case) are returned unchanged. Only the file name part is
/// considered, so dots in directory names are left alone.
pub fn normalize_texture_extension(path: &str) -> String {
    let file_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let file_name = &path[file_start..];

    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            let extension = &file_name[dot + 1..];
            if extension.eq_ignore_ascii_case(PNG_EXTENSION) {
                path.to_string()
            } else {
                format!("{}.{PNG_EXTENSION}", &path[..file_start + dot])
            }
        }
        _ => format!("{path}.{PNG_EXTENSION}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::{CanonicalSelector, MaterialGrouper};
    use crate::materials::{MtlParser, RenderEquivalence, TextureSlot};

    fn newmtl_names(library: &str) -> Vec<&str> {
        library
            .lines()
            .filter_map(|line| line.strip_prefix("newmtl "))
            .collect()
    }

    #[test]
    fn test_only_canonical_members_are_written() {
        let materials = vec![
            Material::new("A").with_diffuse(Vec3::new(1.0, 0.0, 0.0)),
            Material::new("B").with_diffuse(Vec3::new(1.0, 0.0, 0.0)),
            Material::new("C").with_diffuse(Vec3::new(0.0, 0.0, 1.0)),
        ];
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let library = MtlWriter::default().write(&selection);

        assert_eq!(newmtl_names(&library), vec!["A", "C"]);
        assert!(library.contains("Kd 1 0 0\n"));
        assert!(library.contains("Kd 0 0 1\n"));
    }

    #[test]
    fn test_block_layout() {
        let materials = vec![Material::new("Wood").with_texture(TextureSlot::Diffuse, "wood.jpg")];
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let library = MtlWriter::default().write(&selection);

        assert_eq!(
            library,
            "newmtl Wood\n\
             Ka 1 1 1\n\
             Kd 0.8 0.8 0.8\n\
             Ks 0.5 0.5 0.5\n\
             Ke 0 0 0\n\
             Ns 250\n\
             Ni 1\n\
             d 1\n\
             illum 2\n\
             map_Kd wood.jpg\n"
        );
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let materials = vec![Material::new("One"), Material::new("Two").with_dissolve(0.5)];
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let library = MtlWriter::default().write(&selection);

        assert!(library.contains("illum 2\n\nnewmtl Two\n"));
        assert!(!library.ends_with("\n\n"));
    }

    #[test]
    fn test_png_normalization_rewrites_references() {
        let materials = vec![Material::new("Tex")
            .with_texture(TextureSlot::Diffuse, "maps/albedo.jpg")
            .with_texture(TextureSlot::Bump, "maps/normal.PNG")];
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));

        let plain = MtlWriter::default().write(&selection);
        assert!(plain.contains("map_Kd maps/albedo.jpg\n"));

        let normalized = MtlWriter::new(EmitOptions {
            normalize_textures_to_png: true,
        })
        .write(&selection);
        assert!(normalized.contains("map_Kd maps/albedo.png\n"));
        assert!(normalized.contains("map_Bump maps/normal.PNG\n"));
    }

    #[test]
    fn test_written_library_parses_back() {
        let materials = vec![
            Material::new("Glass")
                .with_diffuse(Vec3::new(0.1, 0.2, 0.3))
                .with_dissolve(0.25)
                .with_texture(TextureSlot::Specular, "spec map.tga"),
            Material::new("Plain"),
        ];
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let library = MtlWriter::default().write(&selection);

        let parsed = MtlParser::parse(&library).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], materials[0]);
        assert!(parsed[1].renders_like(&materials[1]));
    }

    #[test]
    fn test_other_statements_are_written_back() {
        let materials = vec![Material::new("Rough")
            .with_statement("Pr", "0.9")
            .with_statement("map_refl", "sky.png")];
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        let library = MtlWriter::default().write(&selection);

        assert!(library.ends_with("illum 2\nPr 0.9\nmap_refl sky.png\n"));
        assert_eq!(MtlParser::parse(&library).unwrap()[0], materials[0]);
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let materials: Vec<Material> = Vec::new();
        let selection = CanonicalSelector::select(MaterialGrouper::group(&materials));
        assert_eq!(MtlWriter::default().write(&selection), "");
    }

    #[test]
    fn test_normalize_texture_extension() {
        assert_eq!(normalize_texture_extension("a.jpg"), "a.png");
        assert_eq!(normalize_texture_extension("dir.v2/a.tga"), "dir.v2/a.png");
        assert_eq!(normalize_texture_extension("dir.v2/noext"), "dir.v2/noext.png");
        assert_eq!(normalize_texture_extension(r"C:\tex\b.JPEG"), r"C:\tex\b.png");
        assert_eq!(normalize_texture_extension("c.png"), "c.png");
        assert_eq!(normalize_texture_extension(".hidden"), ".hidden.png");
        assert_eq!(normalize_texture_extension("archive.tar.gz"), "archive.tar.png");
    }
}
