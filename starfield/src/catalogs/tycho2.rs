//! Tycho-2 main catalog (`tyc2.dat`) records
//!
//! Tycho-2 re-observes most Hipparcos stars. Lines that carry a Hipparcos
//! number are skipped so that both catalogs can be drawn into the same map
//! without counting those stars twice.

use super::scan::{scan_f32, scan_int, Scan};
use super::StarRecord;
use crate::coordinates::Equatorial;

/// Byte offset of `mRAdeg` (mean position, degrees)
pub const RA_OFFSET: usize = 15;
/// Byte offset of `mDEdeg` (mean position, degrees)
pub const DEC_OFFSET: usize = 28;
/// Byte offset of `BTmag`
pub const BT_OFFSET: usize = 110;
/// Byte offset of `VTmag`
pub const VT_OFFSET: usize = 123;
/// Byte offset of `HIP`, followed by the CCDM component letters
pub const HIP_OFFSET: usize = 142;

/// Parse one catalog line.
///
/// The Hipparcos column must hold something that is not a number (blank
/// HIP followed by the CCDM field or separator). Lines that end before it,
/// or that carry a Hipparcos number, produce no record.
pub fn parse_line(line: &[u8]) -> Option<StarRecord> {
    if scan_int(line, HIP_OFFSET) != Scan::NoMatch {
        return None;
    }

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
