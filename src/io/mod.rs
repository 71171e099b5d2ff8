//! Run visualization export.
//!
//! Renders the grid, the path history, start/goal markers and the robot
//! heading to an SVG file for inspecting a run after the fact:
//!
//! ```rust,ignore
//! use marga::io::{SvgConfig, SvgVisualizer};
//! use std::path::Path;
//!
//! SvgVisualizer::new(&scenario.grid, SvgConfig::default())
//!     .with_title("diagonal down")
//!     .with_path(outcome.trajectory.clone())
//!     .with_goal(scenario.goal, 8.0)
//!     .save(Path::new("run.svg"))?;
//! ```

pub mod svg;

pub use svg::{SvgColorScheme, SvgConfig, SvgVisualizer, markers_by_distance};
