//! I/O utilities for rendered sky maps

pub mod tiff;

pub use self::tiff::{write_tiff, TiffError};
