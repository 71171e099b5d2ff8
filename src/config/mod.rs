//! Unified configuration loading for marga.
//!
//! Loads every run-time parameter from a single YAML file with sensible
//! defaults. Missing sections and fields fall back to the defaults below.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga::config::MargaConfig;
//!
//! // Load from default path (configs/marga.yaml), or built-in defaults
//! let config = MargaConfig::load_default()?;
//! config.validate()?;
//!
//! let settings = config.loop_settings();
//! # Ok::<(), marga::Error>(())
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Map size, resolution, navigable margin |
//! | [`LidarSection`] | Scan angle count and maximum range |
//! | [`ControllerConfig`] | Potential field gains, speed, safety margin |
//! | [`SimulationSection`] | Goal radius, iteration budget, logging |
//! | [`ScenarioSection`] | Preset, seed, obstacles |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   map_size: 100.0
//!   resolution: 1.0
//! lidar:
//!   angle_count: 90
//!   max_range: 15.0
//! controller:
//!   safety_margin: 3.0
//!   speed: 0.2
//!   turn_gain: 0.7
//! simulation:
//!   goal_radius: 8.0
//!   iteration_budget: 2000
//! scenario:
//!   preset: diagonal_down
//!   seed: 7
//!   obstacles:
//!     count: 6
//! ```
//!
//! [`ControllerConfig`]: crate::control::ControllerConfig

mod defaults;
mod sections;

pub use sections::{GridSection, LidarSection, MargaConfig, ScenarioSection, SimulationSection};
