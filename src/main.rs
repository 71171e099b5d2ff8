//! Marga - run a single reactive navigation scenario
//!
//! # Usage
//!
//! ```bash
//! # Defaults (configs/marga.yaml if present)
//! cargo run --release
//!
//! # Other preset, fixed seed, SVG output
//! cargo run --release -- --preset up --seed 7 --svg run.svg
//!
//! # Empty map with a tight budget
//! cargo run --release -- --obstacles 0 --budget 500
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use marga::config::MargaConfig;
use marga::io::{SvgConfig, SvgVisualizer};
use marga::scenario::{Preset, ScenarioBuilder};
use marga::sim::{LogObserver, TrajectoryMetrics};

/// Reactive potential-field navigation simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults to configs/marga.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start/goal preset ("down" or "up")
    #[arg(short, long)]
    preset: Option<String>,

    /// Obstacle placement seed (0 = random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of random obstacles
    #[arg(long)]
    obstacles: Option<usize>,

    /// Iteration budget
    #[arg(short, long)]
    budget: Option<usize>,

    /// Write the run to an SVG file
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> marga::Result<()> {
    let mut config = match args.config {
        Some(ref path) => {
            info!("Loading configuration from {}", path.display());
            MargaConfig::load(path)?
        }
        None => MargaConfig::load_default()?,
    };

    if let Some(ref preset) = args.preset {
        config.scenario.preset = preset.parse::<Preset>()?;
    }
    if let Some(seed) = args.seed {
        config.scenario.seed = seed;
    }
    if let Some(count) = args.obstacles {
        config.scenario.obstacles.count = count;
    }
    if let Some(budget) = args.budget {
        config.simulation.iteration_budget = budget;
    }
    config.validate()?;

    let scenario = ScenarioBuilder::from_config(&config).build(config.scenario.seed)?;
    info!(
        "Start ({:.1}, {:.1}, {:.1}°) -> goal ({:.1}, {:.1})",
        scenario.start.x,
        scenario.start.y,
        scenario.start.theta.to_degrees(),
        scenario.goal.x,
        scenario.goal.y
    );

    let mut observer = LogObserver::new(config.simulation.log_interval);
    let outcome = scenario.simulation(&config)?.run(&mut observer);

    let metrics = TrajectoryMetrics::compute(
        &scenario.grid,
        &outcome.trajectory,
        config.simulation.near_miss_distance,
    );
    info!(
        "Result: {} after {} ticks, final distance {:.2}, path length {:.1}",
        outcome.state, outcome.ticks, outcome.final_distance, metrics.path_length
    );
    match metrics.min_clearance {
        Some(clearance) => info!(
            "Clearance: min {:.2}, {} near misses, {} poses inside obstacles",
            clearance, metrics.near_misses, metrics.penetrations
        ),
        None => info!("Clearance: no obstacles on the map"),
    }
    if !outcome.is_goal_reached() {
        warn!("Goal not reached within {} ticks", config.simulation.iteration_budget);
    }

    if let Some(ref path) = args.svg {
        SvgVisualizer::new(&scenario.grid, SvgConfig::default())
            .with_title(format!(
                "{} | seed {} | {}",
                scenario.preset, scenario.seed, outcome.state
            ))
            .with_path(outcome.trajectory.clone())
            .with_goal(scenario.goal, config.simulation.goal_radius)
            .save(path)?;
        info!("SVG written to {}", path.display());
    }

    Ok(())
}
