//! Material record and duplicate-equality
//!
//! A [`Material`] is one `newmtl` block: a name plus the Phong attributes and
//! texture maps that decide how a submesh renders. Two materials are
//! duplicates when every attribute except the name matches; that relation is
//! expressed through [`RenderEquivalence`] so grouping never has to know which
//! attributes exist.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use crate::foundation::math::{float_key, vec3_key, Vec3};

/// Structural equality used to detect duplicate materials
///
/// Implementors return a key that captures everything that affects rendering
/// and nothing that doesn't (in particular, not the name).
pub trait RenderEquivalence {
    /// Hashable witness of the rendering attributes
    type Key: Eq + Hash;

    /// Build the key for this value
    fn render_key(&self) -> Self::Key;

    /// Name the value is referenced by in geometry
    fn name(&self) -> &str;

    /// Whether `self` and `other` render identically
    fn renders_like(&self, other: &Self) -> bool {
        self.render_key() == other.render_key()
    }
}

/// Texture map slot of a Wavefront material
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureSlot {
    /// `map_Ka`
    Ambient,
    /// `map_Kd`
    Diffuse,
    /// `map_Ks`
    Specular,
    /// `map_Ns`
    SpecularExponent,
    /// `map_Ke` (Blender extension)
    Emission,
    /// `map_d`
    Dissolve,
    /// `map_Bump` / `bump`
    Bump,
    /// `map_Pr` (PBR extension)
    Roughness,
    /// `map_Pm` (PBR extension)
    Metallic,
}

impl TextureSlot {
    /// Every slot, in the order they are written to MTL files
    pub const ALL: [Self; 9] = [
        Self::Ambient,
        Self::Diffuse,
        Self::Specular,
        Self::SpecularExponent,
        Self::Emission,
        Self::Dissolve,
        Self::Bump,
        Self::Roughness,
        Self::Metallic,
    ];

    /// Keyword used when writing this slot
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Ambient => "map_Ka",
            Self::Diffuse => "map_Kd",
            Self::Specular => "map_Ks",
            Self::SpecularExponent => "map_Ns",
            Self::Emission => "map_Ke",
            Self::Dissolve => "map_d",
            Self::Bump => "map_Bump",
            Self::Roughness => "map_Pr",
            Self::Metallic => "map_Pm",
        }
    }

    /// Slot for an MTL keyword, accepting the legacy `bump` spelling
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword == "bump" {
            return Some(Self::Bump);
        }
        Self::ALL.into_iter().find(|slot| slot.keyword() == keyword)
    }
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Parsed Wavefront material (Phong model plus texture maps)
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name (`newmtl`)
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Emission color (Ke)
    pub emission: Vec3,
    /// Specular exponent (Ns), 0 to 1000
    pub specular_exponent: f32,
    /// Index of refraction (Ni)
    pub optical_density: f32,
    /// Dissolve/opacity (d) - 0.0 = transparent, 1.0 = opaque
    pub dissolve: f32,
    /// Illumination model (illum) - 0-10
    pub illumination_model: u32,
    /// Texture maps by slot
    pub textures: BTreeMap<TextureSlot, String>,
    /// Statements without a dedicated field (`Pr`, `Tf`, `map_refl`, ...),
    /// as keyword and raw argument in file order
    pub other_statements: Vec<(String, String)>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::new(1.0, 1.0, 1.0),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.5, 0.5, 0.5),
            emission: Vec3::new(0.0, 0.0, 0.0),
            specular_exponent: 250.0,
            optical_density: 1.0,
            dissolve: 1.0,
            illumination_model: 2,
            textures: BTreeMap::new(),
            other_statements: Vec::new(),
        }
    }
}

impl Material {
    /// Create a material with default attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the diffuse color
    #[must_use]
    pub fn with_diffuse(mut self, diffuse: Vec3) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the dissolve (opacity)
    #[must_use]
    pub fn with_dissolve(mut self, dissolve: f32) -> Self {
        self.dissolve = dissolve;
        self
    }

    /// Attach a texture map
    #[must_use]
    pub fn with_texture(mut self, slot: TextureSlot, path: impl Into<String>) -> Self {
        self.textures.insert(slot, path.into());
        self
    }

    /// Attach a statement that has no dedicated field
    #[must_use]
    pub fn with_statement(mut self, keyword: impl Into<String>, argument: impl Into<String>) -> Self {
        self.other_statements.push((keyword.into(), argument.into()));
        self
    }

    /// Texture path for a slot, if any
    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        self.textures.get(&slot).map(String::as_str)
    }
}

/// Rendering attributes of a [`Material`] in hashable form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    colors: [[u32; 3]; 4],
    scalars: [u32; 3],
    illumination_model: u32,
    textures: Vec<(TextureSlot, String)>,
    other_statements: Vec<(String, String)>,
}

impl RenderEquivalence for Material {
    type Key = MaterialKey;

    fn render_key(&self) -> MaterialKey {
        MaterialKey {
            colors: [
                vec3_key(&self.ambient),
                vec3_key(&self.diffuse),
                vec3_key(&self.specular),
                vec3_key(&self.emission),
            ],
            scalars: [
                float_key(self.specular_exponent),
                float_key(self.optical_density),
                float_key(self.dissolve),
            ],
            illumination_model: self.illumination_model,
            textures: self
                .textures
                .iter()
                .map(|(slot, path)| (*slot, path.clone()))
                .collect(),
            other_statements: self.other_statements.clone(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
