//! Simulated lidar.
//!
//! Casts a fan of rays from the robot pose against the occupancy grid and
//! reports one range per configured angle. There is no noise model: the
//! same grid, pose and angle set always produce the same scan.

mod lidar;
mod scan;

pub use lidar::LidarSimulator;
pub use scan::{ScanAngles, ScanEntry, ScanReading};
