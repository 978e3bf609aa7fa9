//! Floating point TIFF output for sky maps
//!
//! Maps are written uncompressed as 32-bit IEEE float RGB, chunky
//! (interleaved) samples, top-left origin. Values are written as they are,
//! without clamping, so the file keeps the full dynamic range of the
//! accumulated image.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

use crate::image_proc::image::SkyImage;

/// TIFF `Orientation` value for row 0 at the top, column 0 at the left
const ORIENTATION_TOP_LEFT: u16 = 1;

/// TIFF `PlanarConfiguration` value for interleaved samples
const PLANAR_CONTIG: u16 = 1;

/// Errors that can occur while writing a TIFF
#[derive(Error, Debug)]
pub enum TiffError {
    #[error("TIFF I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TIFF encoding error: {0}")]
    Encode(#[from] tiff::TiffError),
}

/// Write a sky image as a 32-bit float RGB TIFF
///
/// # Arguments
/// * `image` - Image to write
/// * `path` - Output path, overwritten if it exists
pub fn write_tiff<P: AsRef<Path>>(image: &SkyImage, path: P) -> Result<(), TiffError> {
    // SkyImage dimensions never exceed i32::MAX, so they always fit a TIFF's u32
    let tiff_width = image.width() as u32;
    let tiff_height = image.height() as u32;

    let mut file = BufWriter::new(File::create(path)?);
    let mut encoder = TiffEncoder::new(&mut file)?;
    let mut tiff = encoder.new_image::<colortype::RGB32Float>(tiff_width, tiff_height)?;

    tiff.encoder()
        .write_tag(Tag::Orientation, ORIENTATION_TOP_LEFT)?;
    tiff.encoder()
        .write_tag(Tag::PlanarConfiguration, PLANAR_CONTIG)?;

    tiff.write_data(&image.samples())?;
    drop(encoder);

    file.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    Ok(())
}
