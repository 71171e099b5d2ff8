//! # Marga
//!
//! Reactive lidar-driven navigation on a 2D binary occupancy grid.
//!
//! ## Overview
//!
//! A simulated robot drives from a start pose to a goal with no global
//! planner. Every tick it:
//!
//! 1. casts a fan of lidar rays against the grid ([`sensor`]),
//! 2. fuses goal attraction with inverse-square obstacle repulsion into a
//!    desired heading ([`control`]),
//! 3. turns part of the way towards that heading and moves one fixed step
//!    (unicycle integration), clamped to the navigable interior,
//! 4. pushes the new pose to an observer and checks for termination ([`sim`]).
//!
//! Scenario setup (presets, seeded obstacle placement), YAML configuration
//! and SVG export live in [`scenario`], [`config`] and [`io`].
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::config::MargaConfig;
//! use marga::scenario::{ObstacleSpec, ScenarioBuilder};
//! use marga::sim::NullObserver;
//!
//! let mut config = MargaConfig::default();
//! config.scenario.obstacles = ObstacleSpec::none();
//!
//! let scenario = ScenarioBuilder::from_config(&config).build(42)?;
//! let outcome = scenario.simulation(&config)?.run(&mut NullObserver);
//!
//! assert!(outcome.is_goal_reached());
//! assert!(outcome.final_distance < config.simulation.goal_radius);
//! # Ok::<(), marga::Error>(())
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: right on the map
//! - Y: up on the map
//! - Theta: rotation in radians, CCW positive from +X axis, kept in `(-π, π]`

#![warn(missing_docs)]

// Core types
pub mod core;

// Occupancy grid and ray casting
pub mod grid;

// Simulated lidar
pub mod sensor;

// Potential field controller
pub mod control;

// Closed-loop simulation
pub mod sim;

// Presets and obstacle placement
pub mod scenario;

// Unified configuration
pub mod config;

// SVG export
pub mod io;

mod error;

pub use core::{Force, GridCoord, Pose2D, WorldPoint, angle_diff, normalize_angle};

pub use grid::{OccupancyGrid, RayHit};

pub use sensor::{LidarSimulator, ScanAngles, ScanReading};

pub use control::{ControlStep, ControllerConfig, NavigationBounds, PotentialFieldController};

pub use sim::{
    SimulationLoop, SimulationObserver, SimulationOutcome, SimulationState, TrajectoryMetrics,
};

pub use scenario::{Preset, Scenario, ScenarioBuilder};

pub use config::MargaConfig;

pub use error::{Error, Result};
