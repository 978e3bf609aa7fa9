//! Sky coordinates and star catalog access
//!
//! This crate provides the equatorial and galactic coordinate types used by
//! the sky map renderer, and lazy readers for the fixed-column Hipparcos and
//! Tycho-2 catalog text files.

pub mod catalogs;
pub mod coordinates;

pub use catalogs::{read_catalog, CatalogError, CatalogFormat, CatalogReader, StarRecord};
pub use coordinates::{Equatorial, Galactic};
