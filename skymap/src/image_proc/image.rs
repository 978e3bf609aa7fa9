//! Floating point RGB accumulation buffer for all-sky maps
//!
//! The buffer is an equirectangular grid: columns wrap around in longitude,
//! and rows that run off the top of the map fold back over the pole onto the
//! opposite meridian. Deposits always add, so overlapping stars and repeated
//! catalog entries combine their energy and the image keeps an unbounded
//! positive range.

use std::borrow::Cow;

use ndarray::Array3;
use thiserror::Error;

/// Number of color channels per pixel
pub const CHANNELS: usize = 3;

/// Errors that can occur while creating a sky image
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkyImageError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("image dimensions {width}x{height} exceed the addressable pixel range")]
    TooLarge { width: usize, height: usize },
}

/// Resolve a possibly out-of-range pixel to a location in a `width` by
/// `height` map, or `None` when the deposit falls outside after folding.
///
/// - `y < 0` reflects to `-1 - y` and moves half a turn in longitude.
/// - `y > height` reflects to `height - 1 - y` and moves half a turn. The
///   comparison is against `height` itself, and the reflection lands on a
///   negative row, so deposits at or below the south edge are dropped.
/// - `x` wraps with a floor modulo.
pub fn fold_pixel(x: i32, y: i32, width: i32, height: i32) -> Option<(usize, usize)> {
    let (mut x, mut y) = (i64::from(x), i64::from(y));
    let (width, height) = (i64::from(width), i64::from(height));

    if y < 0 {
        y = -1 - y;
        x += width / 2;
    }
    if y > height {
        y = height - 1 - y;
        x += width / 2;
    }

    let x = x.rem_euclid(width);

    if (0..height).contains(&y) {
        Some((x as usize, y as usize))
    } else {
        None
    }
}

/// Equirectangular RGB sky image with additive deposits
///
/// Stored as a `(height, width, 3)` array in standard layout, so the
/// underlying samples are top-left origin, row-major, channel interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyImage {
    data: Array3<f32>,
}

impl SkyImage {
    /// Create a zeroed image.
    ///
    /// # Arguments
    /// * `width` - Number of columns (full turn of longitude)
    /// * `height` - Number of rows (pole to pole)
    pub fn new(width: usize, height: usize) -> Result<Self, SkyImageError> {
        if width == 0 || height == 0 {
            return Err(SkyImageError::ZeroDimension { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(SkyImageError::TooLarge { width, height });
        }

        Ok(Self {
            data: Array3::zeros((height, width, CHANNELS)),
        })
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// RGB value of the pixel at column `x`, row `y`
    pub fn pixel(&self, x: usize, y: usize) -> [f32; CHANNELS] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ]
    }

    /// Add a color to the pixel at `(x, y)` after wrapping and pole folding.
    ///
    /// Contributions that still fall outside the map after folding are
    /// dropped.
    pub fn deposit(&mut self, x: i32, y: i32, rgb: [f32; CHANNELS]) {
        let width = self.width() as i32;
        let height = self.height() as i32;

        if let Some((x, y)) = fold_pixel(x, y, width, height) {
            for (channel, value) in rgb.into_iter().enumerate() {
                self.data[[y, x, channel]] += value;
            }
        }
    }

    /// Per-channel sums over the whole image
    pub fn channel_sums(&self) -> [f64; CHANNELS] {
        let mut sums = [0.0; CHANNELS];
        for pixel in self.data.rows() {
            for (sum, &value) in sums.iter_mut().zip(pixel.iter()) {
                *sum += value as f64;
            }
        }
        sums
    }

    /// Sum of every sample in the image
    pub fn total_energy(&self) -> f64 {
        self.channel_sums().iter().sum()
    }

    /// Largest sample value
    pub fn peak(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }

    /// Interleaved samples in scanline order, starting at the top-left pixel
    pub fn samples(&self) -> Cow<'_, [f32]> {
        match self.data.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.data.iter().copied().collect()),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let image = SkyImage::new(8, 4).unwrap();
        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 4);
        assert_eq!(image.samples().len(), 8 * 4 * 3);
        assert!(image.samples().iter().all(|&v| v == 0.0));
        assert_eq!(image.total_energy(), 0.0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            SkyImage::new(0, 10).unwrap_err(),
            SkyImageError::ZeroDimension {
                width: 0,
                height: 10
            }
        );
        assert!(SkyImage::new(10, 0).is_err());
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        let too_wide = i32::MAX as usize + 1;
        assert_eq!(
            SkyImage::new(too_wide, 1).unwrap_err(),
            SkyImageError::TooLarge {
                width: too_wide,
                height: 1
            }
        );
        assert!(matches!(
            SkyImage::new(1, too_wide),
            Err(SkyImageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_deposit_accumulates() {
        let mut image = SkyImage::new(4, 4).unwrap();
        image.deposit(1, 2, [1.0, 2.0, 3.0]);
        image.deposit(1, 2, [0.5, 0.5, 0.5]);

        assert_eq!(image.pixel(1, 2), [1.5, 2.5, 3.5]);
        assert_eq!(image.channel_sums(), [1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_samples_are_row_major_interleaved() {
        let mut image = SkyImage::new(3, 2).unwrap();
        image.deposit(2, 1, [1.0, 2.0, 3.0]);

        let samples = image.samples();
        let offset = 3 * (3 * 1 + 2);
        assert_eq!(&samples[offset..offset + 3], &[1.0, 2.0, 3.0]);
        assert!(matches!(samples, Cow::Borrowed(_)));
    }

    #[test]
    fn test_horizontal_wrap() {
        assert_eq!(fold_pixel(10, 3, 10, 5), Some((0, 3)));
        assert_eq!(fold_pixel(0, 3, 10, 5), Some((0, 3)));
        assert_eq!(fold_pixel(-1, 3, 10, 5), Some((9, 3)));
        assert_eq!(fold_pixel(-21, 3, 10, 5), Some((9, 3)));
        assert_eq!(fold_pixel(25, 0, 10, 5), Some((5, 0)));
    }

    #[test]
    fn test_north_pole_fold() {
        // Row -1 reflects onto row 0, half a turn away
        assert_eq!(fold_pixel(2, -1, 10, 5), Some((7, 0)));
        assert_eq!(fold_pixel(2, -3, 10, 5), Some((7, 2)));
        assert_eq!(fold_pixel(8, -1, 10, 5), Some((3, 0)));
    }

    #[test]
    fn test_south_edge_is_dropped() {
        // Row == height is not folded and lies outside the map
        assert_eq!(fold_pixel(2, 5, 10, 5), None);
        // Rows beyond height reflect to negative rows
        assert_eq!(fold_pixel(2, 6, 10, 5), None);
        assert_eq!(fold_pixel(2, 40, 10, 5), None);
        // Last valid row is untouched
        assert_eq!(fold_pixel(2, 4, 10, 5), Some((2, 4)));
    }

    #[test]
    fn test_far_north_overflow_is_dropped() {
        // Folding -12 gives row 11 which then trips the south rule
        assert_eq!(fold_pixel(0, -12, 10, 5), None);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        assert_eq!(fold_pixel(i32::MAX, -1, 10, 5), Some((2, 0)));
        assert_eq!(fold_pixel(i32::MIN, i32::MIN, 10, 5), None);
        assert_eq!(fold_pixel(i32::MAX, i32::MAX, 10, 5), None);
        assert_eq!(fold_pixel(i32::MIN, 2, 10, 5), Some((2, 2)));
    }

    #[test]
    fn test_deposit_folds_over_pole() {
        let mut image = SkyImage::new(10, 5).unwrap();
        image.deposit(1, -1, [1.0, 1.0, 1.0]);
        image.deposit(6, 0, [1.0, 1.0, 1.0]);

        assert_eq!(image.pixel(6, 0), [2.0, 2.0, 2.0]);
        assert_eq!(image.total_energy(), 6.0);
    }

    #[test]
    fn test_deposit_out_of_range_is_dropped() {
        let mut image = SkyImage::new(10, 5).unwrap();
        image.deposit(3, 5, [1.0, 1.0, 1.0]);
        image.deposit(3, 9, [1.0, 1.0, 1.0]);
        assert_eq!(image.total_energy(), 0.0);
    }

    #[test]
    fn test_peak() {
        let mut image = SkyImage::new(4, 4).unwrap();
        image.deposit(0, 0, [0.1, 4.0, 0.2]);
        image.deposit(3, 3, [1.0, 1.0, 1.0]);
        assert_eq!(image.peak(), 4.0);
    }
}
