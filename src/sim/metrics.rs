//! Trajectory quality metrics.
//!
//! The controller has no explicit collision check, so clearance is a
//! derived property of the repulsion field. These metrics record how close
//! a run came to obstacles instead of asserting it never touched one.

use serde::Serialize;

use crate::core::Pose2D;
use crate::grid::OccupancyGrid;

/// Summary of a trajectory against a grid
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrajectoryMetrics {
    /// Number of poses evaluated
    pub poses: usize,
    /// Summed distance between consecutive poses
    pub path_length: f32,
    /// Smallest distance from any pose to an occupied cell (None if the grid is empty)
    pub min_clearance: Option<f32>,
    /// Poses closer than the near-miss distance but not inside an obstacle
    pub near_misses: usize,
    /// Poses inside an occupied cell
    pub penetrations: usize,
}

impl TrajectoryMetrics {
    /// Evaluate a trajectory.
    ///
    /// A pose inside an occupied cell (half-open, as the grid defines it)
    /// is a penetration with clearance 0. Any other pose gets a positive
    /// clearance, floored at `f32::EPSILON` when it touches a cell edge,
    /// and is a near miss below `near_miss_distance`.
    pub fn compute(grid: &OccupancyGrid, trajectory: &[Pose2D], near_miss_distance: f32) -> Self {
        let mut metrics = Self {
            poses: trajectory.len(),
            path_length: trajectory.windows(2).map(|w| w[0].distance(&w[1])).sum(),
            ..Default::default()
        };

        for pose in trajectory {
            let position = pose.position();
            let Some(distance) = grid.distance_to_nearest_occupied(position) else {
                continue;
            };

            let clearance = if grid.is_occupied_at_world(position) {
                metrics.penetrations += 1;
                0.0
            } else {
                let clearance = distance.max(f32::EPSILON);
                if clearance < near_miss_distance {
                    metrics.near_misses += 1;
                }
                clearance
            };

            metrics.min_clearance = Some(match metrics.min_clearance {
                Some(current) => current.min(clearance),
                None => clearance,
            });
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;

    #[test]
    fn test_metrics_empty_grid() {
        let grid = OccupancyGrid::new(10, 10, 1.0).unwrap();
        let trajectory = vec![Pose2D::new(1.0, 1.0, 0.0), Pose2D::new(4.0, 5.0, 0.0)];
        let metrics = TrajectoryMetrics::compute(&grid, &trajectory, 1.0);

        assert_eq!(metrics.poses, 2);
        assert!((metrics.path_length - 5.0).abs() < 1e-6);
        assert_eq!(metrics.min_clearance, None);
        assert_eq!(metrics.near_misses, 0);
    }

    #[test]
    fn test_metrics_near_miss_and_penetration() {
        let mut grid = OccupancyGrid::new(10, 10, 1.0).unwrap();
        grid.fill_world_rect(WorldPoint::new(5.0, 5.0), WorldPoint::new(6.0, 6.0));

        let trajectory = vec![
            Pose2D::new(1.0, 5.5, 0.0), // 4.0 away
            Pose2D::new(4.5, 5.5, 0.0), // 0.5 away
            Pose2D::new(5.5, 5.5, 0.0), // inside
        ];
        let metrics = TrajectoryMetrics::compute(&grid, &trajectory, 1.0);

        assert_eq!(metrics.near_misses, 1);
        assert_eq!(metrics.penetrations, 1);
        assert_eq!(metrics.min_clearance, Some(0.0));
    }

    #[test]
    fn test_metrics_pose_on_far_cell_edge_is_outside() {
        let mut grid = OccupancyGrid::new(10, 10, 1.0).unwrap();
        grid.fill_world_rect(WorldPoint::new(5.0, 5.0), WorldPoint::new(6.0, 6.0));

        // Cell (5, 5) covers [5, 6) x [5, 6): x = 6 belongs to the next cell
        let trajectory = vec![Pose2D::new(6.0, 5.5, 0.0), Pose2D::new(5.5, 6.0, 0.0)];
        assert!(!grid.is_occupied_at_world(trajectory[0].position()));

        let metrics = TrajectoryMetrics::compute(&grid, &trajectory, 1.0);
        assert_eq!(metrics.penetrations, 0);
        assert_eq!(metrics.near_misses, 2);
        let clearance = metrics.min_clearance.unwrap();
        assert!(clearance > 0.0 && clearance < 1e-3);
    }
}
