//! End-to-end tests: catalog files in, float TIFF out

use std::f32::consts::TAU;
use std::fs::File;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use clap::Parser;
use skymap::photometry::COLOR_TABLE;
use skymap::pipeline::{self, SkyMapJob};
use skymap::render_args::RenderArgs;
use skymap::SkyImage;
use starfield::catalogs::{hipparcos, tycho2};
use tiff::decoder::{Decoder, DecodingResult};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn hipparcos_line(ra: &str, dec: &str, bt: &str, vt: &str) -> String {
    test_helpers::fixed_column_line(
        240,
        &[
            (hipparcos::RA_OFFSET, ra),
            (hipparcos::DEC_OFFSET, dec),
            (hipparcos::BT_OFFSET, bt),
            (hipparcos::VT_OFFSET, vt),
        ],
    )
}

fn tycho2_line(ra: &str, dec: &str, bt: &str, vt: &str, hip: &str) -> String {
    let mut line = test_helpers::fixed_column_line(
        151,
        &[
            (tycho2::RA_OFFSET, ra),
            (tycho2::DEC_OFFSET, dec),
            (tycho2::BT_OFFSET, bt),
            (tycho2::VT_OFFSET, vt),
            (tycho2::HIP_OFFSET, hip),
        ],
    );
    line.push('|');
    line
}

fn args(extra: &[&str]) -> RenderArgs {
    RenderArgs::try_parse_from(std::iter::once("skymap").chain(extra.iter().copied())).unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

/// Decode a written map into (width, height, interleaved samples)
fn read_tiff(path: &Path) -> (u32, u32, Vec<f32>) {
    let mut decoder = Decoder::new(File::open(path).unwrap()).unwrap();
    let (width, height) = decoder.dimensions().unwrap();
    match decoder.read_image().unwrap() {
        DecodingResult::F32(samples) => (width, height, samples),
        _ => panic!("expected 32-bit float samples"),
    }
}

fn brightest_pixel(image: &SkyImage) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_value = f32::MIN;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let value = image.pixel(x, y).iter().sum::<f32>();
            if value > best_value {
                best_value = value;
                best = (x, y);
            }
        }
    }
    best
}

struct Fixture {
    _dir: tempfile::TempDir,
    hipparcos: PathBuf,
    tycho2: PathBuf,
    output: PathBuf,
}

/// One Hipparcos star at the origin plus a small Tycho-2 file with one
/// star that carries a HIP number and must be left out.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let hip = test_helpers::write_catalog_fixture(
        dir.path().join("hip_main.dat"),
        [
            "H|header line".to_string(),
            hipparcos_line("0.0", "0.0", "0.0", "0.0"),
        ],
    )
    .unwrap();
    let tyc = test_helpers::write_catalog_fixture(
        dir.path().join("catalog.dat"),
        [
            tycho2_line("90.0", "30.0", "9.5", "9.0", ""),
            tycho2_line("270.0", "-30.0", "8.0", "7.9", "12345"),
            tycho2_line("180.0", "60.0", "10.2", "9.8", ""),
        ],
    )
    .unwrap();
    let output = dir.path().join("map.tif");

    Fixture {
        _dir: dir,
        hipparcos: hip,
        tycho2: tyc,
        output,
    }
}

#[test]
fn test_single_star_map() {
    init_logging();
    let fx = fixture();
    let args = args(&[
        "-H",
        path_str(&fx.hipparcos),
        "-w",
        "100",
        "-h",
        "50",
        "-o",
        path_str(&fx.output),
    ]);

    let summaries = pipeline::run(&args).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].stars, 1);
    assert_eq!(summaries[0].skipped_lines, 1);

    let (width, height, samples) = read_tiff(&fx.output);
    assert_eq!((width, height), (100, 50));

    // Longitude 0 projects to x = 100, which wraps to column 0
    let intensity = 10f32.powf(2.4);
    let amplitude = intensity / TAU;
    let center = 25 * 100 * 3;
    for c in 0..3 {
        assert_relative_eq!(
            samples[center + c],
            amplitude * COLOR_TABLE[1][c],
            max_relative = 1e-5
        );
    }

    let peak = samples.iter().copied().fold(0.0, f32::max);
    assert_eq!(peak, samples[center + 2]);

    let total: f64 = samples.iter().map(|&v| v as f64).sum();
    let color_sum: f32 = COLOR_TABLE[1].iter().sum();
    assert_relative_eq!(total, (intensity * color_sum) as f64, max_relative = 1e-3);
}

#[test]
fn test_tycho2_hip_stars_excluded() {
    init_logging();
    let fx = fixture();
    let args = args(&[
        "-T",
        path_str(&fx.tycho2),
        "-w",
        "360",
        "-h",
        "180",
        "-o",
        path_str(&fx.output),
    ]);

    let summaries = pipeline::run(&args).unwrap();
    assert_eq!(summaries[0].stars, 2);
    assert_eq!(summaries[0].skipped_lines, 1);

    // RA 270, Dec -30 would land around column 90, row 120
    let (_, _, samples) = read_tiff(&fx.output);
    let index = (120 * 360 + 90) * 3;
    assert_eq!(&samples[index..index + 3], &[0.0, 0.0, 0.0]);
}

#[test]
fn test_parallel_matches_sequential() {
    init_logging();
    let fx = fixture();
    let base = [
        "-H",
        path_str(&fx.hipparcos),
        "-T",
        path_str(&fx.tycho2),
        "-w",
        "256",
        "-h",
        "128",
        "-s",
        "1.7",
    ];

    let sequential = SkyMapJob::from_args(&args(&base)).unwrap().render().unwrap();
    let mut parallel_args = base.to_vec();
    parallel_args.push("--parallel");
    let parallel = SkyMapJob::from_args(&args(&parallel_args))
        .unwrap()
        .render()
        .unwrap();

    assert_eq!(sequential.1, parallel.1);
    assert_eq!(sequential.0, parallel.0);
}

#[test]
fn test_galactic_center_in_middle_of_galactic_map() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let hip = test_helpers::write_catalog_fixture(
        dir.path().join("hip.dat"),
        [hipparcos_line("266.40499", "-28.93617", "1.0", "1.0")],
    )
    .unwrap();

    let args = args(&["-H", path_str(&hip), "-w", "360", "-h", "180", "-g"]);
    let (image, _) = SkyMapJob::from_args(&args).unwrap().render().unwrap();

    let (x, y) = brightest_pixel(&image);
    assert!((178..=181).contains(&x), "column {x}");
    assert!((89..=91).contains(&y), "row {y}");
}

#[test]
fn test_no_catalogs_writes_dark_map() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("dark.tif");
    let args = args(&["-w", "16", "-h", "8", "-o", path_str(&output)]);

    assert!(pipeline::run(&args).unwrap().is_empty());

    let (width, height, samples) = read_tiff(&output);
    assert_eq!((width, height), (16, 8));
    assert!(samples.iter().all(|&v| v == 0.0));
}

#[test]
fn test_missing_catalog_still_writes_map() {
    init_logging();
    let fx = fixture();
    let args = args(&[
        "-T",
        "/nonexistent/catalog.dat",
        "-H",
        path_str(&fx.hipparcos),
        "-w",
        "100",
        "-h",
        "50",
        "-o",
        path_str(&fx.output),
    ]);

    let summaries = pipeline::run(&args).unwrap();
    assert!(!summaries[0].opened);
    assert!(summaries[1].opened);
    assert_eq!(summaries[1].stars, 1);
    assert!(fx.output.exists());
}

#[test]
fn test_unwritable_output_fails() {
    init_logging();
    let args = args(&["-w", "4", "-h", "2", "-o", "/nonexistent/dir/map.tif"]);
    let err = pipeline::run(&args).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/dir/map.tif"));
}

#[test]
fn test_map_artifact() {
    init_logging();
    let fx = fixture();
    let output = test_helpers::output_path("end_to_end_all_sky.tif");
    let args = args(&[
        "-H",
        path_str(&fx.hipparcos),
        "-T",
        path_str(&fx.tycho2),
        "-w",
        "512",
        "-h",
        "256",
        "-s",
        "2.0",
        "-o",
        path_str(&output),
    ]);

    let summaries = pipeline::run(&args).unwrap();
    let stars: usize = summaries.iter().map(|s| s.stars).sum();
    assert_eq!(stars, 3);
    assert!(output.exists());
}
