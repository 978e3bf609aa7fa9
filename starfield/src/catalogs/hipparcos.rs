//! Hipparcos main catalog (`hip_main.dat`) records
//!
//! The catalog is a fixed-width, `|` separated text file with one star per
//! line. Only the position and Tycho photometry columns are read.

use super::scan::scan_f32;
use super::StarRecord;
use crate::coordinates::Equatorial;

/// Byte offset of `RAdeg` (degrees, ICRS)
pub const RA_OFFSET: usize = 51;
/// Byte offset of `DEdeg` (degrees, ICRS)
pub const DEC_OFFSET: usize = 64;
/// Byte offset of `BTmag`
pub const BT_OFFSET: usize = 217;
/// Byte offset of `VTmag`
pub const VT_OFFSET: usize = 230;

/// Parse one catalog line, returning `None` for anything that does not
/// carry a full position and both magnitudes.
pub fn parse_line(line: &[u8]) -> Option<StarRecord> {
    let ra = scan_f32(line, RA_OFFSET).value()?;
    let dec = scan_f32(line, DEC_OFFSET).value()?;
    let b_mag = scan_f32(line, BT_OFFSET).value()?;
    let v_mag = scan_f32(line, VT_OFFSET).value()?;

    Some(StarRecord {
        position: Equatorial::from_degrees(ra, dec),
        b_mag,
        v_mag,
    })
}
