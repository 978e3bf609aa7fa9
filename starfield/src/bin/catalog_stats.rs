//! Tool to analyze a star catalog file
//!
//! Reads a Hipparcos or Tycho-2 catalog and prints record counts plus the
//! magnitude, declination and color index distributions of its stars.
//!
//! Usage:
//! ```text
//! cargo run --bin catalog_stats -- --format tycho2 tyc2.dat
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use starfield::{read_catalog, CatalogFormat, StarRecord};

/// Command line arguments for catalog statistics
#[derive(Parser, Debug)]
#[command(
    name = "Catalog Statistics",
    about = "Prints magnitude, declination and color distributions of a star catalog",
    long_about = None
)]
struct Args {
    /// Catalog layout: hipparcos or tycho2
    #[arg(short, long, default_value = "hipparcos")]
    format: CatalogFormat,

    /// Catalog file
    path: PathBuf,
}

/// Count stars falling in each `[min, max)` range and print the table
fn print_distribution(
    title: &str,
    stars: &[StarRecord],
    ranges: &[(f32, f32, &str)],
    value: impl Fn(&StarRecord) -> f32,
) {
    println!("\n{title}:");
    for (min, max, desc) in ranges {
        let count = stars
            .iter()
            .filter(|star| {
                let v = value(star);
                v >= *min && v < *max
            })
            .count();
        let percentage = if stars.is_empty() {
            0.0
        } else {
            count as f64 / stars.len() as f64 * 100.0
        };
        println!("  {desc}: {count} stars ({percentage:.1}%)");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Star Catalog Statistics Tool");
    println!("===========================");

    let mut reader = read_catalog(&args.path, args.format)
        .with_context(|| format!("cannot analyze {}", args.path.display()))?;
    let stars: Vec<StarRecord> = reader.by_ref().collect();

    println!("Catalog: {} ({})", args.path.display(), args.format);
    println!("Total stars: {}", stars.len());
    println!("Skipped lines: {}", reader.skipped());

    let mag_ranges = [
        (f32::NEG_INFINITY, 0.0, "Very bright stars (V < 0)"),
        (0.0, 2.0, "Bright stars (V 0 to 2)"),
        (2.0, 4.0, "Medium bright stars (V 2 to 4)"),
        (4.0, 6.0, "Naked eye visible stars (V 4 to 6)"),
        (6.0, 8.0, "Binocular visible stars (V 6 to 8)"),
        (8.0, 10.0, "Telescope visible stars (V 8 to 10)"),
        (10.0, f32::INFINITY, "Faint stars (V >= 10)"),
    ];
    print_distribution("Magnitude Distribution", &stars, &mag_ranges, |s| s.v_mag);

    let dec_bands = [
        (-90.0, -60.0, "South polar region (dec -90° to -60°)"),
        (-60.0, -30.0, "South temperate (dec -60° to -30°)"),
        (-30.0, 0.0, "South tropical (dec -30° to 0°)"),
        (0.0, 30.0, "North tropical (dec 0° to 30°)"),
        (30.0, 60.0, "North temperate (dec 30° to 60°)"),
        (60.0, 90.01, "North polar region (dec 60° to 90°)"),
    ];
    print_distribution("Spatial Distribution (by declination)", &stars, &dec_bands, |s| {
        s.position.dec.to_degrees()
    });

    let color_bands = [
        (f32::NEG_INFINITY, 0.0, "Blue (B-V < 0)"),
        (0.0, 0.3, "White (B-V 0 to 0.3)"),
        (0.3, 0.6, "Yellow-white (B-V 0.3 to 0.6)"),
        (0.6, 1.0, "Yellow (B-V 0.6 to 1.0)"),
        (1.0, 1.5, "Orange (B-V 1.0 to 1.5)"),
        (1.5, f32::INFINITY, "Red (B-V >= 1.5)"),
    ];
    print_distribution("Color Distribution (B_T - V_T)", &stars, &color_bands, |s| {
        s.b_mag - s.v_mag
    });

    if let Some(brightest) = stars
        .iter()
        .min_by(|a, b| a.v_mag.total_cmp(&b.v_mag))
    {
        println!("\nBrightest star:");
        println!("  V magnitude: {:.3}", brightest.v_mag);
        println!(
            "  Position: RA {:.4}°, Dec {:.4}°",
            brightest.position.ra.to_degrees(),
            brightest.position.dec.to_degrees()
        );
    }

    Ok(())
}
