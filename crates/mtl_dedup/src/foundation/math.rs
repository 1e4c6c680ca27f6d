//! Math types used for material colors

pub use nalgebra::Vector3;

/// RGB color triple as stored in MTL files
pub type Vec3 = Vector3<f32>;

/// Bit pattern of a float suitable for hashing
///
/// `-0.0` is folded onto `0.0` so values that compare equal also hash equal.
/// NaN payloads are kept as-is, so two identical NaNs are treated as equal.
pub fn float_key(value: f32) -> u32 {
    if value == 0.0 {
        0.0_f32.to_bits()
    } else {
        value.to_bits()
    }
}

/// Hashable key for a color triple, see [`float_key`]
pub fn vec3_key(value: &Vec3) -> [u32; 3] {
    [float_key(value.x), float_key(value.y), float_key(value.z)]
}
