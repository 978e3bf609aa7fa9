//! Photometric model for star colors and brightness
//!
//! Converts the blue and visual magnitudes of a catalog star into a linear
//! RGB color and the total energy the star deposits in the sky map.

pub mod color;
pub mod stellar;

pub use color::{color_of, COLOR_INDEX_BREAKPOINTS, COLOR_TABLE};
pub use stellar::StarPhotometry;
