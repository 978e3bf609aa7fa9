//! Per-star photometry from catalog B and V magnitudes

use super::color::color_of;

/// Scale from the catalog B-V difference to the color index used for color
const COLOR_INDEX_SCALE: f64 = 0.85;

/// Correction applied to V using the catalog B-V difference
const VISUAL_CORRECTION: f64 = 0.09;

/// Color and energy of one star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPhotometry {
    /// Color index `0.85 * (b - v)`
    pub color_index: f32,
    /// Corrected visual magnitude `v - 0.09 * (b - v)`
    pub magnitude: f32,
    /// Total energy, in pixels' worth of unit intensity
    pub intensity: f32,
    /// Linear RGB color for the color index
    pub rgb: [f32; 3],
}

impl StarPhotometry {
    /// Compute photometry for a star.
    ///
    /// # Arguments
    /// * `b_mag` - Blue magnitude
    /// * `v_mag` - Visual magnitude
    /// * `zero_magnitude` - Magnitude of a star whose energy fills exactly one pixel
    pub fn from_magnitudes(b_mag: f32, v_mag: f32, zero_magnitude: f32) -> Self {
        let difference = (b_mag - v_mag) as f64;
        let color_index = (COLOR_INDEX_SCALE * difference) as f32;
        let magnitude = (v_mag as f64 - VISUAL_CORRECTION * difference) as f32;

        Self {
            color_index,
            magnitude,
            intensity: magnitude_to_intensity(magnitude, zero_magnitude),
            rgb: color_of(color_index),
        }
    }
}

/// Energy of a star of `magnitude` relative to one of `zero_magnitude`.
///
/// Five magnitudes is a factor of 100; the result is never negative.
pub fn magnitude_to_intensity(magnitude: f32, zero_magnitude: f32) -> f32 {
    10.0f32.powf(((zero_magnitude - magnitude) as f64 / 2.5) as f32)
}
