//! Reactive steering.
//!
//! [`PotentialFieldController`] fuses a constant-magnitude pull towards the
//! goal with inverse-square pushes away from close lidar returns, turns
//! towards the resulting heading with a fixed proportional gain and moves
//! one unicycle step forward.
//!
//! ```text
//!            goal ◎
//!                ▲  attraction (k_att, constant length)
//!                │
//!     obstacle ■─┼──► repulsion (1/r², away from bearing, r < 2·margin)
//!                │
//!              robot ●  ──► heading ← θ + k_turn · angle_error
//! ```
//!
//! The field has no planning horizon. Symmetric obstacle layouts can trap
//! the robot in a local minimum and dense clutter can produce erratic
//! headings; both are properties of the method, not failures of a step.

mod config;
mod potential_field;

pub use config::ControllerConfig;
pub use potential_field::{ControlStep, NavigationBounds, PotentialFieldController};
