//! Celestial coordinate systems
//!
//! Positions are stored in single precision radians, which is the precision
//! the catalogs are published in and the precision the renderer works in.

use std::f32::consts::{PI, TAU};

/// Convert degrees to radians the way catalog positions are converted.
pub fn radians(degrees: f32) -> f32 {
    PI * degrees / 180.0
}

/// Right ascension of the node used by the galactic rotation (282.75°).
const NODE_RA: f32 = PI * 282.25 / 180.0 + PI * 0.5 / 180.0;

/// Inclination of the galactic plane to the celestial equator (62.6°).
const INCLINATION: f32 = PI * 62.6 / 180.0;

/// Galactic longitude of the node (33° - 90°).
const NODE_LONGITUDE: f32 = PI * 33.0 / 180.0 - PI * 90.0 / 180.0;

/// Equatorial (J2000-ish) sky position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in radians
    pub ra: f32,
    /// Declination in radians
    pub dec: f32,
}

impl Equatorial {
    /// Create from right ascension and declination in radians
    pub fn new(ra: f32, dec: f32) -> Self {
        Self { ra, dec }
    }

    /// Create from right ascension and declination in degrees
    pub fn from_degrees(ra: f32, dec: f32) -> Self {
        Self::new(radians(ra), radians(dec))
    }

    /// Rotate into galactic coordinates.
    ///
    /// Uses the classic three-constant rotation: node right ascension,
    /// inclination of the galactic plane, and the longitude of the node.
    /// Longitude is measured so that the galactic center falls at `l = π`.
    /// The result is brought back into `[0, 2π]` with a single correction in
    /// each direction.
    pub fn to_galactic(&self) -> Galactic {
        let (sin_d, cos_d) = self.dec.sin_cos();
        let (sin_r, cos_r) = (self.ra - NODE_RA).sin_cos();

        let n1 = cos_d * cos_r;
        let n2 = sin_d * INCLINATION.sin() + cos_d * sin_r * INCLINATION.cos();
        let n3 = sin_d * INCLINATION.cos() - cos_d * sin_r * INCLINATION.sin();

        let mut l = NODE_LONGITUDE - n1.atan2(n2);
        let b = n3.asin();

        if l > TAU {
            l -= TAU;
        }
        if l < 0.0 {
            l += TAU;
        }

        Galactic { l, b }
    }
}

/// Galactic sky position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Galactic {
    /// Galactic longitude in radians
    pub l: f32,
    /// Galactic latitude in radians
    pub b: f32,
}
