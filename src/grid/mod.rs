//! Binary occupancy grid and ray casting.
//!
//! The grid is fixed-size and built once during scenario setup. After setup
//! it is only borrowed shared, so any number of simulation loops can read
//! the same grid without locking.
//!
//! ## Cell Layout
//!
//! Cell `(i, j)` covers the half-open world square
//! `[ox + i·R, ox + (i+1)·R) × [oy + j·R, oy + (j+1)·R)` where `R` is the
//! resolution (length units per cell) and `(ox, oy)` the grid origin.
//!
//! ```text
//!   y
//!   ▲   ┌───┬───┬───┐
//!   │   │0,2│1,2│2,2│
//!   │   ├───┼───┼───┤
//!   │   │0,1│1,1│2,1│
//!   │   ├───┼───┼───┤
//!   │   │0,0│1,0│2,0│
//!   │   └───┴───┴───┘
//! origin ─────────────► x
//! ```
//!
//! ## Boundary Policy
//!
//! Point queries outside `[0, W) × [0, H)` report occupied (the world
//! boundary is a wall). Rays are different: a ray that leaves the grid
//! without touching an occupied cell is a miss, so lidar reads max range
//! towards open map edges.

mod occupancy;
pub mod raycaster;

pub use occupancy::OccupancyGrid;
pub use raycaster::{RayCast, RayHit};
