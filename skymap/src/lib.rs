//! All-sky star map rendering
//!
//! This crate turns star catalogs into equirectangular, floating point RGB
//! sky maps. Each star is drawn as a Gaussian whose color follows its B-V
//! color index and whose volume follows its magnitude, accumulated into an
//! unclamped buffer that wraps in longitude and folds over the poles.

pub mod image_proc;
pub mod io;
pub mod photometry;
pub mod pipeline;
pub mod render_args;
pub mod star_math;

// Re-exports for easier access
pub use image_proc::image::{SkyImage, SkyImageError};
pub use image_proc::render::{splat, RenderParameters, RenderStats, SkyRenderer};
pub use io::tiff::{write_tiff, TiffError};
pub use photometry::{color_of, StarPhotometry};
pub use star_math::EquirectangularProjection;
pub use starfield::{CatalogFormat, StarRecord};
