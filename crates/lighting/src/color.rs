//! Shared color math for light derivation.
//!
//! Colors are linear-RGB `Vec3`s: each channel is configured in [0, 1] and
//! becomes unconstrained only after the brightness scale is applied.

use bevy::prelude::*;

/// Largest of the three channels. A color is "non-black" when this is > 0.
pub fn max_channel(rgb: Vec3) -> f32 {
    rgb.x.max(rgb.y).max(rgb.z)
}

/// Rescale so the largest channel becomes exactly 1.0, preserving channel
/// ratios. An all-zero color is returned unchanged.
pub fn normalize_brightness(rgb: Vec3) -> Vec3 {
    let max = max_channel(rgb);
    if max == 0.0 {
        return Vec3::ZERO;
    }
    rgb / max
}
