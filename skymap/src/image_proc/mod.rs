//! Sky image buffer and star rasterization

pub mod image;
pub mod render;
