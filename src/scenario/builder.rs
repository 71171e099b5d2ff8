//! Scenario construction.

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{GridSection, MargaConfig};
use crate::control::{NavigationBounds, PotentialFieldController};
use crate::core::{Pose2D, WorldPoint};
use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;
use crate::sim::SimulationLoop;

use super::obstacles::{Block, ObstacleSpec, place_obstacles};
use super::preset::Preset;

/// A fully built run: grid, endpoints and the obstacles placed on it.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Occupancy grid with every block rasterized
    pub grid: OccupancyGrid,
    /// Start pose
    pub start: Pose2D,
    /// Goal point
    pub goal: WorldPoint,
    /// Fixed blocks followed by randomly placed ones
    pub blocks: Vec<Block>,
    /// Preset the endpoints came from
    pub preset: Preset,
    /// Seed actually used for placement
    pub seed: u64,
    /// Navigable interior
    pub bounds: NavigationBounds,
}

impl Scenario {
    /// Build a simulation loop over this scenario's grid.
    pub fn simulation(&self, config: &MargaConfig) -> Result<SimulationLoop<'_>> {
        let controller = PotentialFieldController::new(config.controller.clone(), self.bounds);
        SimulationLoop::new(
            &self.grid,
            controller,
            config.loop_settings(),
            self.start,
            self.goal,
        )
    }
}

/// Builds [`Scenario`]s from configuration.
///
/// ```rust
/// use marga::config::MargaConfig;
/// use marga::scenario::{Preset, ScenarioBuilder};
///
/// let config = MargaConfig::default();
/// let scenario = ScenarioBuilder::from_config(&config)
///     .preset(Preset::DiagonalUp)
///     .build(42)?;
/// assert_eq!(scenario.grid.width(), 100);
/// # Ok::<(), marga::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    grid: GridSection,
    preset: Preset,
    obstacles: ObstacleSpec,
    blocks: Vec<Block>,
}

impl ScenarioBuilder {
    /// Start from the grid and scenario sections of `config`.
    pub fn from_config(config: &MargaConfig) -> Self {
        Self {
            grid: config.grid.clone(),
            preset: config.scenario.preset,
            obstacles: config.scenario.obstacles.clone(),
            blocks: config.scenario.blocks.clone(),
        }
    }

    /// Override the preset
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Override the random obstacle spec
    pub fn obstacles(mut self, spec: ObstacleSpec) -> Self {
        self.obstacles = spec;
        self
    }

    /// Add a fixed block
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Build the scenario. A seed of 0 draws a fresh seed from entropy.
    pub fn build(self, seed: u64) -> Result<Scenario> {
        let map_size = self.grid.map_size;
        if !map_size.is_finite() || map_size <= 0.0 {
            return Err(Error::invalid(format!(
                "grid.map_size must be > 0, got {}",
                map_size
            )));
        }

        let mut grid = self.grid.to_grid()?;
        let start = self.preset.start(map_size);
        let goal = self.preset.goal(map_size);

        let seed = if seed == 0 {
            // Non-zero so the run can be reproduced from the log
            SmallRng::from_entropy().gen_range(1..=u64::MAX)
        } else {
            seed
        };
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut blocks = self.blocks;
        blocks.extend(place_obstacles(
            &mut rng,
            &self.obstacles,
            map_size,
            self.grid.boundary_margin,
            &[start.position(), goal],
        )?);

        for block in &blocks {
            grid.fill_world_rect(block.min(), block.max());
        }

        info!(
            "Scenario '{}': {} blocks, {} occupied cells, seed {}",
            self.preset,
            blocks.len(),
            grid.occupied_count(),
            seed
        );

        Ok(Scenario {
            grid,
            start,
            goal,
            blocks,
            preset: self.preset,
            seed,
            bounds: self.grid.navigation_bounds(),
        })
    }
}
