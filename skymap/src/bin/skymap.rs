//! Render Hipparcos and Tycho-2 catalogs into an all-sky float TIFF.
//!
//! ```text
//! skymap -H hip_main.dat -T catalog.dat -w 8192 -h 4096 -g -o galaxy.tif
//! ```
//!
//! Set `RUST_LOG=info` for progress output.

use clap::Parser;
use log::info;
use skymap::pipeline;
use skymap::render_args::RenderArgs;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = RenderArgs::parse();

    let summaries = pipeline::run(&args)?;
    let stars: usize = summaries.iter().map(|s| s.stars).sum();
    info!("Done: {stars} stars from {} catalog(s)", summaries.len());

    Ok(())
}
