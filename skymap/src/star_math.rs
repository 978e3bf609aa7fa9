//! Sky to pixel coordinate transformations
//!
//! All-sky maps use the equirectangular projection: longitude maps
//! linearly to columns and latitude linearly to rows.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Equirectangular projection onto a `width` by `height` pixel grid
///
/// Longitude increases to the left, as seen from inside the celestial
/// sphere, with one full turn across the width. The north pole is the top
/// edge of row 0 and the south pole the bottom edge of the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquirectangularProjection {
    width: usize,
    height: usize,
}

impl EquirectangularProjection {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Project a longitude/latitude pair (radians) to the pixel containing it.
    ///
    /// No clamping is done. Longitude 0 lands on column `width`, and values
    /// outside the map are left for the image's wrap and pole folding.
    pub fn project(&self, lon: f32, lat: f32) -> (i32, i32) {
        let x = (self.width as f32 * (TAU - lon) / TAU).floor();
        let y = (self.height as f32 * (FRAC_PI_2 - lat) / PI).floor();
        (x as i32, y as i32)
    }
}
