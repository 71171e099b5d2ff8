//! Lidar simulator with ray-casting.

use log::trace;

use crate::core::{Pose2D, normalize_angle};
use crate::grid::OccupancyGrid;

use super::scan::{ScanAngles, ScanEntry, ScanReading};

/// Lidar simulator
///
/// Stateless: a scan is a pure function of grid, pose, angles and range.
#[derive(Clone, Copy, Debug, Default)]
pub struct LidarSimulator;

impl LidarSimulator {
    /// Create new lidar simulator
    pub fn new() -> Self {
        Self
    }

    /// Generate a scan from the robot position.
    ///
    /// For each relative offset the ray is cast at
    /// `normalize(pose.theta + offset)`. A miss reads `max_range`, a hit
    /// reads the Euclidean distance from the pose to the hit point. The
    /// output has exactly one entry per offset, in offset order.
    pub fn scan(
        &self,
        grid: &OccupancyGrid,
        pose: &Pose2D,
        angles: &ScanAngles,
        max_range: f32,
    ) -> ScanReading {
        let origin = pose.position();

        let entries: Vec<ScanEntry> = angles
            .offsets()
            .iter()
            .map(|offset| {
                let angle = normalize_angle(pose.theta + offset);
                let range = match grid.ray_intersection(origin, angle, max_range) {
                    Some(hit) => origin.distance(&hit.point).min(max_range),
                    None => max_range,
                };
                ScanEntry { range, angle }
            })
            .collect();

        let scan = ScanReading::new(entries, max_range);
        trace!(
            "Scan at ({:.2}, {:.2}): {} rays, {} hits",
            pose.x,
            pose.y,
            scan.len(),
            scan.hit_count()
        );
        scan
    }
}
