//! Map generator binary: layout -> floor brushwork -> `.map` file.
//!
//! Usage: cargo run --release --bin generate_map -- [OPTIONS]
//!
//! Options are layered over the config file (if any), which is layered over
//! the built-in defaults. Set `RUST_LOG=debug` to follow every path.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use brushforge::config::MapConfig;
use brushforge::core::logging;
use brushforge::core::types::Result;
use brushforge::generation::BrushworkGenerator;
use brushforge::layout::AbstractLayout;
use brushforge::mapfile::MapFile;

#[derive(Parser)]
#[command(name = "generate_map", version, about = "Procedural floor brushwork for GoldSrc maps")]
struct Args {
    /// JSON config file; unspecified fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed, for reproducible maps
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to write the .map file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Randomize the layout topology
    #[arg(long)]
    variation: bool,

    /// Add info_null markers at every layout location
    #[arg(long)]
    draw_layout: bool,

    /// Growth attempts allowed per path
    #[arg(long)]
    steps: Option<u32>,
}

fn resolve_config(args: &Args) -> Result<MapConfig> {
    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if args.variation {
        config.layout.variation.enabled = true;
    }
    if args.draw_layout {
        config.draw_layout = true;
    }
    if let Some(steps) = args.steps {
        config.generator.max_path_steps = steps;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("Seed: {}", seed);

    let start = Instant::now();
    let mut layout = AbstractLayout::with_variation(&mut rng, &config.layout.variation);
    layout.validate()?;
    layout.place(&mut rng, &config.layout.placement);
    log::info!(
        "Layout: {} accessible locations, {} paths",
        layout.accessible().count(),
        layout.paths().len()
    );

    let mut generator = BrushworkGenerator::new(&layout, config.generator.clone(), config.texture.clone())?;
    let report = generator.make_floor(&mut rng);
    for failure in report.failures() {
        if let Err(e) = &failure.result {
            log::warn!("Path {} left unconnected: {}", failure.path, e);
        }
    }

    let mut map = MapFile::new(config.wads.as_slice());
    if config.draw_layout {
        map.draw_layout(&layout);
    }
    map.add_brushes(generator.into_brushes());
    map.save(&config.output)?;

    log::info!(
        "Generated in {:.1} ms ({}/{} paths connected)",
        start.elapsed().as_secs_f64() * 1000.0,
        report.connected(),
        report.paths.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    logging::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
