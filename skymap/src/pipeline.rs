//! Catalog-to-TIFF rendering pipeline
//!
//! Ties the pieces together: allocate the map, stream each requested catalog
//! through the renderer, then write the accumulated image. A catalog that
//! cannot be opened is reported and skipped; it contributes no stars.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use starfield::{read_catalog, CatalogFormat};

use crate::image_proc::image::SkyImage;
use crate::image_proc::render::{RenderError, RenderParameters, RenderStats, SkyRenderer};
use crate::io::tiff::write_tiff;
use crate::render_args::RenderArgs;

/// What happened to one catalog during a render
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    pub format: CatalogFormat,
    pub path: PathBuf,
    /// False when the file could not be opened
    pub opened: bool,
    pub stars: usize,
    pub skipped_lines: usize,
    pub deposits: usize,
}

/// Map dimensions, parameters and the catalogs to draw, in order
#[derive(Debug, Clone)]
pub struct SkyMapJob<'a> {
    pub width: usize,
    pub height: usize,
    pub params: RenderParameters,
    pub catalogs: Vec<(CatalogFormat, &'a Path)>,
    pub parallel: bool,
}

impl<'a> SkyMapJob<'a> {
    pub fn from_args(args: &'a RenderArgs) -> Result<Self, RenderError> {
        Ok(Self {
            width: args.width as usize,
            height: args.height as usize,
            params: args.render_parameters()?,
            catalogs: args.catalogs(),
            parallel: args.parallel,
        })
    }

    /// Render every catalog into a fresh map.
    pub fn render(&self) -> Result<(SkyImage, Vec<CatalogSummary>), RenderError> {
        let mut renderer = SkyRenderer::new(self.width, self.height, self.params)?;
        let summaries = self
            .catalogs
            .iter()
            .map(|&(format, path)| self.draw_catalog(&mut renderer, format, path))
            .collect();
        Ok((renderer.into_image(), summaries))
    }

    fn draw_catalog(
        &self,
        renderer: &mut SkyRenderer,
        format: CatalogFormat,
        path: &Path,
    ) -> CatalogSummary {
        let mut summary = CatalogSummary {
            format,
            path: path.to_path_buf(),
            opened: false,
            stars: 0,
            skipped_lines: 0,
            deposits: 0,
        };

        let mut reader = match read_catalog(path, format) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("Skipping {format} catalog: {e}");
                return summary;
            }
        };

        let start = Instant::now();
        let stats: RenderStats = if self.parallel {
            renderer.draw_catalog_par(&mut reader)
        } else {
            renderer.draw_catalog(&mut reader)
        };

        summary.opened = true;
        summary.stars = stats.stars;
        summary.deposits = stats.deposits;
        summary.skipped_lines = reader.skipped();

        info!(
            "Drew {} {format} stars from {} in {:.2?} ({} lines skipped)",
            summary.stars,
            path.display(),
            start.elapsed(),
            summary.skipped_lines
        );
        summary
    }
}

/// Render the map described by `args` and write it to `args.output`.
pub fn run(args: &RenderArgs) -> anyhow::Result<Vec<CatalogSummary>> {
    let job = SkyMapJob::from_args(args).context("Invalid render settings")?;
    info!(
        "Rendering {}x{} {} map, sigma {} px, zero magnitude {}",
        job.width,
        job.height,
        if job.params.galactic {
            "galactic"
        } else {
            "equatorial"
        },
        job.params.sigma,
        job.params.zero_magnitude
    );

    let (image, summaries) = job.render().context("Failed to set up the sky map")?;

    info!(
        "Peak sample {:.3}, total energy {:.3}",
        image.peak(),
        image.total_energy()
    );

    write_tiff(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(summaries)
}
