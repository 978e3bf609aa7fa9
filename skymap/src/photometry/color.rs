//! Star color from B-V color index
//!
//! A seven point calibration table maps color index to a linear RGB color,
//! running from the blue-white of early B stars to the orange of late K
//! and M stars.
//!
//! Between breakpoints the two neighbouring colors are mixed using the
//! color index itself as the mixing weight, not its fractional position
//! between the breakpoints. The result is piecewise and not continuous
//! across breakpoints.

/// Color index breakpoints, strictly increasing
pub const COLOR_INDEX_BREAKPOINTS: [f32; 7] = [-0.33, -0.17, 0.15, 0.44, 0.68, 1.15, 1.64];

/// Linear RGB color at each breakpoint
pub const COLOR_TABLE: [[f32; 3]; 7] = [
    [0.608, 0.690, 1.000],
    [0.667, 0.749, 1.000],
    [0.792, 0.843, 1.000],
    [0.973, 0.969, 1.000],
    [1.000, 0.957, 0.918],
    [1.000, 0.824, 0.631],
    [1.000, 0.800, 0.435],
];

fn lerp(t: f32, a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    std::array::from_fn(|i| (1.0 - t) * a[i] + t * b[i])
}

/// Linear RGB color for a B-V color index.
///
/// Indices below the first breakpoint return the first color, indices at
/// or above the last breakpoint return the last color, without
/// extrapolation.
pub fn color_of(color_index: f32) -> [f32; 3] {
    let last = COLOR_TABLE.len() - 1;

    match COLOR_INDEX_BREAKPOINTS
        .iter()
        .position(|&breakpoint| color_index < breakpoint)
    {
        Some(0) => COLOR_TABLE[0],
        Some(i) => lerp(color_index, &COLOR_TABLE[i - 1], &COLOR_TABLE[i]),
        None => COLOR_TABLE[last],
    }
}
