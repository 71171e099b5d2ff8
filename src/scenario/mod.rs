//! Scenario setup: start/goal presets and seeded obstacle placement.
//!
//! A [`Scenario`] owns the occupancy grid for a run together with the
//! start pose and goal point. All randomness in the crate lives here; the
//! control loop itself is deterministic.
//!
//! ```text
//!  preset ──► start / goal
//!                │
//!  blocks ───────┼──► OccupancyGrid ──► Scenario::simulation()
//!                │
//!  ObstacleSpec ─┘  (seeded SmallRng, bounded retries)
//! ```

mod builder;
mod obstacles;
mod preset;

pub use builder::{Scenario, ScenarioBuilder};
pub use obstacles::{Block, ObstacleSpec, place_obstacles};
pub use preset::Preset;
