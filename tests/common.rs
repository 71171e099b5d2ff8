//! Test utilities for marga integration tests.

#![allow(dead_code)]

use marga::config::MargaConfig;
use marga::scenario::{Block, ObstacleSpec, Scenario, ScenarioBuilder};
use marga::{OccupancyGrid, ScanAngles, WorldPoint};

/// Initialize logging once; ignore repeated calls.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Default configuration with random obstacles disabled.
pub fn empty_config() -> MargaConfig {
    let mut config = MargaConfig::default();
    config.scenario.obstacles = ObstacleSpec::none();
    config
}

/// Default-preset scenario on an empty 100×100 map.
pub fn empty_scenario(config: &MargaConfig) -> Scenario {
    ScenarioBuilder::from_config(config)
        .build(1)
        .expect("empty scenario")
}

/// Scenario with a single 4×4 block centered on the diagonal start→goal line.
pub fn blocked_scenario(config: &MargaConfig) -> Scenario {
    ScenarioBuilder::from_config(config)
        .block(Block::centered(WorldPoint::new(50.0, 50.0), 4.0))
        .build(1)
        .expect("blocked scenario")
}

/// Empty grid with a vertical wall one cell thick at column `x`.
pub fn wall_grid(size: usize, x: i32) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(size, size, 1.0).expect("grid");
    grid.fill_world_rect(
        WorldPoint::new(x as f32, 0.0),
        WorldPoint::new(x as f32 + 1.0, size as f32),
    );
    grid
}

/// The default 90-ray full-circle scan pattern.
pub fn default_angles() -> ScanAngles {
    ScanAngles::full_circle(90)
}
