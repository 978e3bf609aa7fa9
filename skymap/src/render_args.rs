use std::path::{Path, PathBuf};

use clap::Parser;
use starfield::CatalogFormat;

use crate::image_proc::render::{ParameterError, RenderParameters};

/// Parse a Gaussian width, which must be a positive finite number of pixels
fn parse_sigma(s: &str) -> Result<f32, String> {
    let sigma = s
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid sigma value '{s}'"))?;
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(format!("Sigma must be positive, got {sigma}"));
    }
    Ok(sigma)
}

/// Parse a finite magnitude
fn parse_magnitude(s: &str) -> Result<f32, String> {
    let mag = s
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid magnitude value '{s}'"))?;
    if !mag.is_finite() {
        return Err(format!("Magnitude must be finite, got {mag}"));
    }
    Ok(mag)
}

/// Command line arguments for rendering an all-sky map
///
/// `-h` sets the image height, so help is only available as `--help`.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "skymap",
    about = "Render star catalogs into an equirectangular float TIFF",
    disable_help_flag = true
)]
pub struct RenderArgs {
    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,

    /// Hipparcos main catalog (hip_main.dat)
    #[arg(short = 'H', long)]
    pub hipparcos: Option<PathBuf>,

    /// Tycho-2 catalog (catalog.dat)
    #[arg(short = 'T', long)]
    pub tycho2: Option<PathBuf>,

    /// Output TIFF path
    #[arg(short, long, default_value = "out.tif")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(short, long, default_value_t = 4096, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(short, long, default_value_t = 2048, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Gaussian standard deviation in pixels
    #[arg(short, long, default_value_t = 1.0, value_parser = parse_sigma)]
    pub sigma: f32,

    /// Magnitude of a star whose energy fills exactly one pixel
    #[arg(
        short = 'm',
        long,
        default_value_t = 6.0,
        allow_negative_numbers = true,
        value_parser = parse_magnitude
    )]
    pub zero_magnitude: f32,

    /// Draw in galactic instead of equatorial coordinates
    #[arg(short, long, default_value_t = false)]
    pub galactic: bool,

    /// Evaluate star footprints on all cores
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

impl RenderArgs {
    pub fn render_parameters(&self) -> Result<RenderParameters, ParameterError> {
        RenderParameters::new(self.galactic, self.sigma, self.zero_magnitude)
    }

    /// Catalogs to draw, in drawing order: Tycho-2 first, then Hipparcos.
    pub fn catalogs(&self) -> Vec<(CatalogFormat, &Path)> {
        [
            (CatalogFormat::Tycho2, self.tycho2.as_deref()),
            (CatalogFormat::Hipparcos, self.hipparcos.as_deref()),
        ]
        .into_iter()
        .filter_map(|(format, path)| path.map(|p| (format, p)))
        .collect()
    }
}
