//! Core types shared by every layer of the navigation stack.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward / right on the map
//! - **Y-axis**: Left / up on the map
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! ## Type Categories
//!
//! - [`GridCoord`]: Integer cell indices for occupancy grid access
//! - [`WorldPoint`]: Floating-point world coordinates (also used as a 2D force vector)
//! - [`Pose2D`]: Robot position (x, y) and heading (theta)
//!
//! Angles are kept in `(-π, π]` by [`normalize_angle`].

mod math;
mod point;
mod pose;

pub use math::{angle_diff, normalize_angle};
pub use point::{Force, GridCoord, WorldPoint};
pub use pose::Pose2D;
