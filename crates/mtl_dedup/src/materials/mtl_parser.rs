//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into [`Material`] records. Exporters emit one
//! `newmtl` block per submesh, so the parser keeps blocks in file order and
//! does not merge repeated names; deciding what is redundant is the job of
//! [`crate::dedup`].

use thiserror::Error;

use super::material::{Material, TextureSlot};
use crate::foundation::math::Vec3;

/// Errors produced while parsing MTL text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtlParseError {
    /// A statement is missing its value
    #[error("Line {line}: {command} missing value")]
    MissingValue {
        /// 1-based line number
        line: usize,
        /// Statement keyword
        command: String,
    },

    /// A numeric value could not be parsed
    #[error("Line {line}: {command} invalid value '{value}'")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Statement keyword
        command: String,
        /// Offending token
        value: String,
    },
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into materials, in `newmtl` order
    ///
    /// Statements before the first `newmtl` are ignored. Statements without
    /// a dedicated [`Material`] field are kept verbatim in
    /// [`Material::other_statements`].
    pub fn parse(contents: &str) -> Result<Vec<Material>, MtlParseError> {
        let mut materials = Vec::new();
        let mut current_material: Option<Material> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };
            // Raw remainder keeps inner whitespace of names and paths intact
            let rest = line[command.len()..].trim();

            if command == "newmtl" {
                if let Some(mat) = current_material.take() {
                    materials.push(mat);
                }

                // Names may contain spaces; keep the rest of the line
                let name = Self::parse_rest(rest, line_num, command)?;
                current_material = Some(Material::new(name));
                continue;
            }

            let Some(mat) = current_material.as_mut() else {
                log::trace!("Line {}: '{}' outside of a material, ignored", line_num + 1, command);
                continue;
            };

            match command {
                "Ka" => mat.ambient = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Kd" => mat.diffuse = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ks" => mat.specular = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ke" => mat.emission = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ns" => mat.specular_exponent = Self::parse_f32(&mut tokens, line_num, command)?,
                "Ni" => mat.optical_density = Self::parse_f32(&mut tokens, line_num, command)?,
                "d" => mat.dissolve = Self::parse_f32(&mut tokens, line_num, command)?,
                "Tr" => {
                    // Transparency (inverted dissolve): Tr = 1.0 - d
                    let transparency = Self::parse_f32(&mut tokens, line_num, command)?;
                    mat.dissolve = 1.0 - transparency;
                }
                "illum" => mat.illumination_model = Self::parse_u32(&mut tokens, line_num, command)?,
                _ => {
                    if let Some(slot) = TextureSlot::from_keyword(command) {
                        let path = Self::parse_rest(rest, line_num, command)?;
                        mat.textures.insert(slot, path);
                    } else {
                        log::debug!("Line {}: keeping '{}' verbatim", line_num + 1, command);
                        mat.other_statements.push((command.to_string(), rest.to_string()));
                    }
                }
            }
        }

        if let Some(mat) = current_material {
            materials.push(mat);
        }

        Ok(materials)
    }

    /// Parse a Vec3 color from RGB tokens
    ///
    /// A single value is a grey shorthand and is applied to all channels.
    fn parse_vec3<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Vec3, MtlParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let mut rest = tokens.peekable();
        if rest.peek().is_none() {
            return Ok(Vec3::new(r, r, r));
        }
        let g = Self::parse_f32(&mut rest, line_num, command)?;
        let b = Self::parse_f32(&mut rest, line_num, command)?;
        Ok(Vec3::new(r, g, b))
    }

    /// Parse a single f32 value
    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, MtlParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = Self::next_token(tokens, line_num, command)?;
        token.parse::<f32>().map_err(|_| MtlParseError::InvalidNumber {
            line: line_num + 1,
            command: command.to_string(),
            value: token.to_string(),
        })
    }

    /// Parse a single u32 value
    fn parse_u32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<u32, MtlParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = Self::next_token(tokens, line_num, command)?;
        token.parse::<u32>().map_err(|_| MtlParseError::InvalidNumber {
            line: line_num + 1,
            command: command.to_string(),
            value: token.to_string(),
        })
    }

    /// Rest of the line as written (names and texture paths can have spaces)
    fn parse_rest(rest: &str, line_num: usize, command: &str) -> Result<String, MtlParseError> {
        if rest.is_empty() {
            return Err(MtlParseError::MissingValue {
                line: line_num + 1,
                command: command.to_string(),
            });
        }
        Ok(rest.to_string())
    }

    fn next_token<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<&'a str, MtlParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        tokens.next().ok_or_else(|| MtlParseError::MissingValue {
            line: line_num + 1,
            command: command.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_simple_material() {
        let mtl_content = r"
# Simple material
newmtl TestMaterial
Ka 1.0 1.0 1.0
Kd 0.8 0.2 0.2
Ks 0.5 0.5 0.5
Ns 250.0
Ni 1.45
d 1.0
illum 2
";

        let materials = MtlParser::parse(mtl_content).unwrap();
        assert_eq!(materials.len(), 1);

        let mat = &materials[0];
        assert_eq!(mat.name, "TestMaterial");
        assert_eq!(mat.diffuse, Vec3::new(0.8, 0.2, 0.2));
        assert_relative_eq!(mat.specular_exponent, 250.0);
        assert_relative_eq!(mat.optical_density, 1.45);
        assert_relative_eq!(mat.dissolve, 1.0);
        assert_eq!(mat.illumination_model, 2);
    }

    #[test]
    fn test_parse_material_with_textures() {
        let mtl_content = r"
newmtl TexturedMaterial
Kd 1.0 1.0 1.0
map_Kd textures/diffuse.jpg
bump textures/normal map.png
map_Ke textures/emission.png
";

        let materials = MtlParser::parse(mtl_content).unwrap();
        let mat = &materials[0];

        assert_eq!(mat.texture(TextureSlot::Diffuse), Some("textures/diffuse.jpg"));
        assert_eq!(mat.texture(TextureSlot::Bump), Some("textures/normal map.png"));
        assert_eq!(mat.texture(TextureSlot::Emission), Some("textures/emission.png"));
        assert_eq!(mat.texture(TextureSlot::Specular), None);
    }

    #[test]
    fn test_names_and_paths_keep_inner_whitespace() {
        let materials = MtlParser::parse("newmtl Car  Paint\tRed\nmap_Kd normal  map.png\n").unwrap();

        assert_eq!(materials[0].name, "Car  Paint\tRed");
        assert_eq!(materials[0].texture(TextureSlot::Diffuse), Some("normal  map.png"));
    }

    #[test]
    fn test_unknown_statements_are_kept_in_order() {
        let materials = MtlParser::parse("newmtl Rough\nKd 1 0 0\nPr 0.9\nmap_refl  sky.png\nTf 1 1 1\n").unwrap();

        assert_eq!(
            materials[0].other_statements,
            vec![
                ("Pr".to_string(), "0.9".to_string()),
                ("map_refl".to_string(), "sky.png".to_string()),
                ("Tf".to_string(), "1 1 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_file_order_and_repeated_blocks() {
        let mtl_content = r"
newmtl material_2
Kd 1.0 0.0 0.0

newmtl material_1
Kd 0.0 1.0 0.0

newmtl material_2
Kd 0.0 0.0 1.0
";

        let materials = MtlParser::parse(mtl_content).unwrap();
        let names: Vec<&str> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["material_2", "material_1", "material_2"]);
        assert_eq!(materials[2].diffuse, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_parse_transparency() {
        let materials = MtlParser::parse("newmtl TransparentMat\nTr 0.3\n").unwrap();

        // Tr = 1.0 - d, so Tr 0.3 means d = 0.7
        assert_relative_eq!(materials[0].dissolve, 0.7, epsilon = 0.001);
    }

    #[test]
    fn test_parse_grey_shorthand() {
        let materials = MtlParser::parse("newmtl Grey\nKd 0.5\n").unwrap();
        assert_eq!(materials[0].diffuse, Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_statements_outside_material_are_ignored() {
        let materials = MtlParser::parse("Kd 1 0 0\nnewmtl First\n").unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].diffuse, Material::default().diffuse);
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = MtlParser::parse("newmtl Broken\nNs shiny\n").unwrap_err();
        assert_eq!(
            err,
            MtlParseError::InvalidNumber {
                line: 2,
                command: "Ns".to_string(),
                value: "shiny".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let err = MtlParser::parse("newmtl\n").unwrap_err();
        assert!(matches!(err, MtlParseError::MissingValue { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(MtlParser::parse("").unwrap().is_empty());
    }
}
