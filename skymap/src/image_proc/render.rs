//! Gaussian star rasterization for all-sky maps
//!
//! Each star becomes a 2-D Gaussian whose volume equals the star's
//! intensity. Near the poles the equirectangular projection stretches
//! rows horizontally, so the footprint is widened by `1 / cos(dec)` and the
//! horizontal falloff squeezed by `cos(dec)`, keeping the blob round on the
//! sphere.

use std::f32::consts::TAU;
use std::ops::Range;

use log::debug;
use rayon::prelude::*;
use starfield::StarRecord;
use thiserror::Error;

use super::image::{SkyImage, SkyImageError};
use crate::photometry::StarPhotometry;
use crate::star_math::EquirectangularProjection;

/// Footprint half-size, in standard deviations
pub const FOOTPRINT_SIGMAS: f32 = 4.0;

/// Stars evaluated per batch by the parallel renderer
const PARALLEL_BATCH: usize = 16_384;

/// Errors from invalid render parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("sigma must be a positive, finite number of pixels, got {0}")]
    InvalidSigma(f32),
    #[error("zero magnitude must be finite, got {0}")]
    InvalidZeroMagnitude(f32),
}

/// Errors that can occur while setting up a renderer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Image(#[from] SkyImageError),
    #[error(transparent)]
    Parameters(#[from] ParameterError),
}

/// Settings shared by every star of a render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    /// Draw in galactic rather than equatorial coordinates
    pub galactic: bool,
    /// Gaussian standard deviation in pixels
    pub sigma: f32,
    /// Magnitude whose star integrates to exactly one pixel of unit intensity
    pub zero_magnitude: f32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            galactic: false,
            sigma: 1.0,
            zero_magnitude: 6.0,
        }
    }
}

impl RenderParameters {
    pub fn new(galactic: bool, sigma: f32, zero_magnitude: f32) -> Result<Self, ParameterError> {
        let params = Self {
            galactic,
            sigma,
            zero_magnitude,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ParameterError::InvalidSigma(self.sigma));
        }
        if !self.zero_magnitude.is_finite() {
            return Err(ParameterError::InvalidZeroMagnitude(self.zero_magnitude));
        }
        Ok(())
    }
}

/// One weighted color contribution to a pixel, before wrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deposit {
    pub x: i32,
    pub y: i32,
    pub rgb: [f32; 3],
}

/// A star's Gaussian footprint, centered on an integer pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSplat {
    pub x: i32,
    pub y: i32,
    pub rgb: [f32; 3],
    amplitude: f32,
    sigma: f32,
    cos_dec: f32,
    half_width: f32,
    half_height: f32,
}

impl GaussianSplat {
    /// Build the footprint of a star.
    ///
    /// # Arguments
    /// * `x`, `y` - Center pixel, possibly outside the image
    /// * `rgb` - Star color
    /// * `intensity` - Total volume of the Gaussian
    /// * `sigma` - Standard deviation in pixels
    /// * `dec` - Latitude of the star in radians, used for the polar stretch
    /// * `max_half_width` - Cap on the horizontal half-width in pixels
    ///
    /// At the poles `cos(dec)` reaches zero (or a tiny value of either sign in
    /// single precision) and the stretched half-width is unbounded. It is
    /// capped at `max_half_width`, normally half the image width, so a row
    /// receives at most one full turn of the footprint.
    pub fn new(
        x: i32,
        y: i32,
        rgb: [f32; 3],
        intensity: f32,
        sigma: f32,
        dec: f32,
        max_half_width: f32,
    ) -> Self {
        let cos_dec = dec.cos();

        Self {
            x,
            y,
            rgb,
            amplitude: intensity / (TAU * sigma * sigma),
            sigma,
            cos_dec,
            half_width: (FOOTPRINT_SIGMAS * sigma / cos_dec.abs()).min(max_half_width),
            half_height: FOOTPRINT_SIGMAS * sigma,
        }
    }

    /// Peak value of the kernel, at the center pixel
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Horizontal offsets covered: `[-floor(w), ceil(w))`
    pub fn x_range(&self) -> Range<i32> {
        -(self.half_width.floor() as i32)..self.half_width.ceil() as i32
    }

    /// Vertical offsets covered: `[-floor(h), ceil(h))`
    pub fn y_range(&self) -> Range<i32> {
        -(self.half_height.floor() as i32)..self.half_height.ceil() as i32
    }

    /// Number of pixel contributions in the footprint
    pub fn footprint_len(&self) -> usize {
        self.x_range().len() * self.y_range().len()
    }

    /// Kernel weight at offset `(xx, yy)` from the center
    pub fn weight(&self, xx: i32, yy: i32) -> f32 {
        let s2 = self.sigma * self.sigma;
        let c = self.cos_dec;
        let xx2 = (xx as i64 * xx as i64) as f32;
        let yy2 = (yy as i64 * yy as i64) as f32;

        self.amplitude * (-(xx2 * c * c / s2 / 2.0 + yy2 / s2 / 2.0)).exp()
    }

    /// Visit every contribution, row by row
    pub fn for_each_deposit(&self, mut visit: impl FnMut(Deposit)) {
        for yy in self.y_range() {
            for xx in self.x_range() {
                let k = self.weight(xx, yy);
                visit(Deposit {
                    x: self.x.saturating_add(xx),
                    y: self.y.saturating_add(yy),
                    rgb: self.rgb.map(|channel| channel * k),
                });
            }
        }
    }

    /// Collect every contribution in drawing order
    pub fn deposits(&self) -> Vec<Deposit> {
        let mut deposits = Vec::with_capacity(self.footprint_len());
        self.for_each_deposit(|d| deposits.push(d));
        deposits
    }

    /// Add the footprint to an image
    pub fn draw(&self, image: &mut SkyImage) {
        self.for_each_deposit(|d| image.deposit(d.x, d.y, d.rgb));
    }
}

/// Draw a Gaussian star into `image` centered on pixel `(x, y)`.
///
/// The Gaussian has standard deviation `sigma` and integrates to
/// `intensity` times `rgb` over the plane, less the tails cut off at four
/// standard deviations. Its horizontal extent follows the latitude `dec`.
pub fn splat(
    image: &mut SkyImage,
    x: i32,
    y: i32,
    rgb: [f32; 3],
    intensity: f32,
    sigma: f32,
    dec: f32,
) {
    let max_half_width = image.width() as f32 / 2.0;
    GaussianSplat::new(x, y, rgb, intensity, sigma, dec, max_half_width).draw(image);
}

/// Totals for a batch of drawn stars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Stars drawn
    pub stars: usize,
    /// Pixel contributions evaluated, including ones dropped off the map
    pub deposits: usize,
}

impl std::ops::AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.stars += other.stars;
        self.deposits += other.deposits;
    }
}

/// Renders catalog stars into a sky image it owns.
///
/// Stars are deposited in the order they are given. The parallel path only
/// evaluates footprints concurrently and deposits them in that same order,
/// so both paths give bit-identical images.
pub struct SkyRenderer {
    params: RenderParameters,
    projection: EquirectangularProjection,
    image: SkyImage,
}

impl SkyRenderer {
    /// Create a renderer with a zeroed `width` by `height` image
    pub fn new(width: usize, height: usize, params: RenderParameters) -> Result<Self, RenderError> {
        params.validate()?;
        let image = SkyImage::new(width, height)?;

        Ok(Self {
            params,
            projection: EquirectangularProjection::new(width, height),
            image,
        })
    }

    /// Map a star to its footprint: optional galactic rotation, projection,
    /// photometry.
    pub fn prepare(&self, star: &StarRecord) -> GaussianSplat {
        let (lon, lat) = if self.params.galactic {
            let galactic = star.position.to_galactic();
            (galactic.l, galactic.b)
        } else {
            (star.position.ra, star.position.dec)
        };

        let (x, y) = self.projection.project(lon, lat);
        let photometry =
            StarPhotometry::from_magnitudes(star.b_mag, star.v_mag, self.params.zero_magnitude);

        GaussianSplat::new(
            x,
            y,
            photometry.rgb,
            photometry.intensity,
            self.params.sigma,
            lat,
            self.image.width() as f32 / 2.0,
        )
    }

    /// Draw a single star
    pub fn draw_star(&mut self, star: &StarRecord) -> RenderStats {
        let footprint = self.prepare(star);
        footprint.draw(&mut self.image);

        RenderStats {
            stars: 1,
            deposits: footprint.footprint_len(),
        }
    }

    /// Draw every star of a catalog, one after another
    pub fn draw_catalog<I>(&mut self, stars: I) -> RenderStats
    where
        I: IntoIterator<Item = StarRecord>,
    {
        let mut stats = RenderStats::default();
        for star in stars {
            stats += self.draw_star(&star);
        }

        debug!(
            "Drew {} stars ({} pixel contributions)",
            stats.stars, stats.deposits
        );
        stats
    }

    /// Draw every star of a catalog, evaluating footprints on the rayon pool
    pub fn draw_catalog_par<I>(&mut self, stars: I) -> RenderStats
    where
        I: IntoIterator<Item = StarRecord>,
    {
        let mut stats = RenderStats::default();
        let mut stars = stars.into_iter();
        let mut batch: Vec<StarRecord> = Vec::with_capacity(PARALLEL_BATCH);

        loop {
            batch.clear();
            batch.extend(stars.by_ref().take(PARALLEL_BATCH));
            if batch.is_empty() {
                break;
            }

            let footprints: Vec<Vec<Deposit>> = batch
                .par_iter()
                .map(|star| self.prepare(star).deposits())
                .collect();

            for footprint in footprints {
                stats += RenderStats {
                    stars: 1,
                    deposits: footprint.len(),
                };
                for d in footprint {
                    self.image.deposit(d.x, d.y, d.rgb);
                }
            }
        }

        debug!(
            "Drew {} stars in parallel ({} pixel contributions)",
            stats.stars, stats.deposits
        );
        stats
    }

    pub fn image(&self) -> &SkyImage {
        &self.image
    }

    pub fn into_image(self) -> SkyImage {
        self.image
    }
}
