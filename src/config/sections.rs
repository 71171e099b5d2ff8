//! Configuration sections and the top-level MargaConfig.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::control::{ControllerConfig, NavigationBounds};
use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;
use crate::scenario::{Block, ObstacleSpec, Preset};
use crate::sensor::ScanAngles;
use crate::sim::LoopSettings;

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Side length of the square map (world units)
    #[serde(default = "defaults::map_size")]
    pub map_size: f32,

    /// World units per cell
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// Distance kept from the map edge when clamping the robot position
    #[serde(default = "defaults::boundary_margin")]
    pub boundary_margin: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            map_size: defaults::map_size(),
            resolution: defaults::resolution(),
            boundary_margin: defaults::boundary_margin(),
        }
    }
}

impl GridSection {
    /// Cells per side
    pub fn cells_per_side(&self) -> usize {
        (self.map_size / self.resolution).ceil() as usize
    }

    /// Build an empty occupancy grid of this size
    pub fn to_grid(&self) -> Result<OccupancyGrid> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(Error::invalid(format!(
                "grid.resolution must be > 0, got {}",
                self.resolution
            )));
        }
        OccupancyGrid::new(self.cells_per_side(), self.cells_per_side(), self.resolution)
    }

    /// Navigable interior `[margin, map_size - margin]`
    pub fn navigation_bounds(&self) -> NavigationBounds {
        NavigationBounds::square(self.map_size, self.boundary_margin)
    }
}

/// Lidar configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LidarSection {
    /// Number of rays evenly spanning the full circle
    #[serde(default = "defaults::angle_count")]
    pub angle_count: usize,

    /// Maximum range
    #[serde(default = "defaults::max_range")]
    pub max_range: f32,
}

impl Default for LidarSection {
    fn default() -> Self {
        Self {
            angle_count: defaults::angle_count(),
            max_range: defaults::max_range(),
        }
    }
}

/// Simulation loop section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Goal reached strictly inside this distance
    #[serde(default = "defaults::goal_radius")]
    pub goal_radius: f32,

    /// Maximum number of ticks
    #[serde(default = "defaults::iteration_budget")]
    pub iteration_budget: usize,

    /// Progress log interval in ticks
    #[serde(default = "defaults::log_interval")]
    pub log_interval: usize,

    /// Clearance below which a pose is counted as a near miss
    #[serde(default = "defaults::near_miss_distance")]
    pub near_miss_distance: f32,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            goal_radius: defaults::goal_radius(),
            iteration_budget: defaults::iteration_budget(),
            log_interval: defaults::log_interval(),
            near_miss_distance: defaults::near_miss_distance(),
        }
    }
}

/// Scenario section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSection {
    /// Start/goal preset
    #[serde(default)]
    pub preset: Preset,

    /// RNG seed for obstacle placement (0 = entropy)
    #[serde(default = "defaults::seed")]
    pub seed: u64,

    /// Random obstacle placement
    #[serde(default)]
    pub obstacles: ObstacleSpec,

    /// Fixed obstacles placed before the random ones
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            seed: defaults::seed(),
            obstacles: ObstacleSpec::default(),
            blocks: Vec::new(),
        }
    }
}

/// Full marga configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Lidar settings
    #[serde(default)]
    pub lidar: LidarSection,

    /// Controller settings
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Simulation loop settings
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Scenario settings
    #[serde(default)]
    pub scenario: ScenarioSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/marga.yaml), or use defaults
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/marga.yaml");
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every parameter against its physical range.
    ///
    /// Called before any loop is built; a failure here is fatal.
    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if !grid.resolution.is_finite() || grid.resolution <= 0.0 {
            return Err(Error::invalid(format!(
                "grid.resolution must be > 0, got {}",
                grid.resolution
            )));
        }
        if !grid.map_size.is_finite() || grid.map_size <= 0.0 {
            return Err(Error::invalid(format!(
                "grid.map_size must be > 0, got {}",
                grid.map_size
            )));
        }
        if !grid.boundary_margin.is_finite()
            || grid.boundary_margin < 0.0
            || 2.0 * grid.boundary_margin >= grid.map_size
        {
            return Err(Error::invalid(format!(
                "grid.boundary_margin must be in [0, map_size / 2), got {}",
                grid.boundary_margin
            )));
        }

        self.controller.validate()?;
        self.loop_settings().validate()?;
        self.scenario.obstacles.validate(grid.map_size)?;

        if !self.simulation.near_miss_distance.is_finite()
            || self.simulation.near_miss_distance < 0.0
        {
            return Err(Error::invalid(format!(
                "simulation.near_miss_distance must be >= 0, got {}",
                self.simulation.near_miss_distance
            )));
        }

        Ok(())
    }

    /// Runtime loop settings
    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            scan_angles: ScanAngles::full_circle(self.lidar.angle_count),
            max_scan_range: self.lidar.max_range,
            goal_radius: self.simulation.goal_radius,
            iteration_budget: self.simulation.iteration_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MargaConfig::default();
        assert_eq!(config.grid.map_size, 100.0);
        assert_eq!(config.grid.resolution, 1.0);
        assert_eq!(config.lidar.angle_count, 90);
        assert_eq!(config.lidar.max_range, 15.0);
        assert_eq!(config.controller.speed, 0.2);
        assert_eq!(config.controller.safety_margin, 3.0);
        assert_eq!(config.controller.turn_gain, 0.7);
        assert_eq!(config.simulation.goal_radius, 8.0);
        assert_eq!(config.simulation.iteration_budget, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = MargaConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = MargaConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "controller:\n  speed: 0.5\nlidar:\n  angle_count: 36\n";
        let config = MargaConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.controller.speed, 0.5);
        assert_eq!(config.controller.turn_gain, 0.7);
        assert_eq!(config.lidar.angle_count, 36);
        assert_eq!(config.lidar.max_range, 15.0);
        assert_eq!(config.grid.map_size, 100.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MargaConfig::default();
        config.grid.resolution = 0.0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let mut config = MargaConfig::default();
        config.lidar.angle_count = 0;
        assert!(config.validate().is_err());

        let mut config = MargaConfig::default();
        config.controller.speed = -0.2;
        assert!(config.validate().is_err());

        let mut config = MargaConfig::default();
        config.grid.boundary_margin = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        let result = MargaConfig::from_yaml("grid: [not, a, map]");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_grid_from_section() {
        let section = GridSection {
            map_size: 10.0,
            resolution: 0.5,
            boundary_margin: 1.0,
        };
        let grid = section.to_grid().unwrap();
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.world_size(), (10.0, 10.0));
        assert_eq!(section.navigation_bounds().max.x, 9.0);
    }
}
