//! Artificial potential field controller with unicycle integration.

use log::trace;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::core::{Force, Pose2D, WorldPoint, angle_diff};
use crate::grid::OccupancyGrid;
use crate::sensor::ScanReading;

use super::config::ControllerConfig;

/// Axis-aligned box the robot position is clamped into after each step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationBounds {
    /// Lower-left corner
    pub min: WorldPoint,
    /// Upper-right corner
    pub max: WorldPoint,
}

impl NavigationBounds {
    /// Create bounds from corners
    pub fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self { min, max }
    }

    /// `[margin, map_size - margin]` on both axes
    pub fn square(map_size: f32, margin: f32) -> Self {
        Self {
            min: WorldPoint::new(margin, margin),
            max: WorldPoint::new(map_size - margin, map_size - margin),
        }
    }

    /// Grid world extent shrunk by `margin` on every side
    pub fn from_grid(grid: &OccupancyGrid, margin: f32) -> Self {
        let (min, max) = grid.bounds();
        Self {
            min: min + WorldPoint::new(margin, margin),
            max: max - WorldPoint::new(margin, margin),
        }
    }

    /// Is the box non-degenerate?
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Clamp a point componentwise into the box
    #[inline]
    pub fn clamp(&self, point: WorldPoint) -> WorldPoint {
        WorldPoint::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// Is the point inside the box (inclusive)?
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Everything computed by one controller step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlStep {
    /// Pose after turning and moving
    pub pose: Pose2D,
    /// Goal attraction
    pub attraction: Force,
    /// Unweighted sum of obstacle pushes
    pub repulsion: Force,
    /// attraction + weight · repulsion
    pub force: Force,
    /// Heading of the total force
    pub desired_heading: f32,
    /// Shortest signed turn from the old heading to `desired_heading`, in (-π, π]
    pub angle_error: f32,
}

/// Fixed-gain reactive potential field controller.
///
/// Memoryless between steps: the output depends only on the arguments.
#[derive(Clone, Debug)]
pub struct PotentialFieldController {
    config: ControllerConfig,
    bounds: NavigationBounds,
}

impl PotentialFieldController {
    /// Create a controller clamping positions into `bounds`
    pub fn new(config: ControllerConfig, bounds: NavigationBounds) -> Self {
        Self { config, bounds }
    }

    /// Get the configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get the navigation bounds
    pub fn bounds(&self) -> &NavigationBounds {
        &self.bounds
    }

    /// Constant-magnitude pull along the goal heading.
    ///
    /// Independent of distance, so the field never vanishes at the goal.
    pub fn attraction(&self, pose: &Pose2D, goal: &WorldPoint) -> Force {
        let goal_heading = pose.position().angle_to(goal);
        WorldPoint::from_angle(goal_heading) * self.config.attraction_gain
    }

    /// Sum of inverse-square pushes away from every close reading.
    ///
    /// Readings at or beyond `2 · safety_margin` contribute nothing. Ranges
    /// are floored at `min_repulsion_range` before squaring.
    pub fn repulsion(&self, scan: &ScanReading) -> Force {
        let influence = self.config.influence_range();
        let mut repulsion = Force::ZERO;

        for entry in scan.iter().filter(|e| e.range < influence) {
            let r = entry.range.max(self.config.min_repulsion_range);
            repulsion += WorldPoint::from_angle(entry.angle + PI) * (1.0 / (r * r));
        }

        repulsion
    }

    /// Combine attraction and weighted repulsion
    #[inline]
    pub fn total_force(&self, attraction: Force, repulsion: Force) -> Force {
        attraction + repulsion * self.config.repulsion_weight
    }

    /// Compute the next pose.
    ///
    /// Turns by `turn_gain · angle_error` towards the total force heading,
    /// then moves `speed` along the new heading and clamps the position
    /// into the navigation bounds.
    pub fn step(&self, pose: &Pose2D, scan: &ScanReading, goal: &WorldPoint) -> ControlStep {
        let attraction = self.attraction(pose, goal);
        let repulsion = self.repulsion(scan);
        let force = self.total_force(attraction, repulsion);

        let desired_heading = force.heading();
        let angle_error = angle_diff(pose.theta, desired_heading);
        let new_theta = pose.theta + self.config.turn_gain * angle_error;

        let moved = pose.position().point_at(new_theta, self.config.speed);
        let position = self.bounds.clamp(moved);

        trace!(
            "Step: force=({:.3}, {:.3}) desired={:.3} error={:.3}",
            force.x,
            force.y,
            desired_heading,
            angle_error
        );

        ControlStep {
            pose: Pose2D::from_position(position, new_theta),
            attraction,
            repulsion,
            force,
            desired_heading,
            angle_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn controller() -> PotentialFieldController {
        PotentialFieldController::new(
            ControllerConfig::default(),
            NavigationBounds::square(100.0, 2.0),
        )
    }

    fn clear_scan(n: usize) -> ScanReading {
        let angles: Vec<f32> = (0..n).map(|i| i as f32 * 0.1).collect();
        ScanReading::from_ranges(&vec![15.0; n], &angles, 15.0)
    }

    #[test]
    fn test_attraction_is_constant_magnitude() {
        let ctrl = controller();
        let pose = Pose2D::new(10.0, 10.0, 0.0);
        let near = ctrl.attraction(&pose, &WorldPoint::new(10.5, 10.0));
        let far = ctrl.attraction(&pose, &WorldPoint::new(90.0, 10.0));
        assert_relative_eq!(near.length(), 0.5, epsilon = 1e-6);
        assert_relative_eq!(far.length(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_repulsion_zero_beyond_threshold() {
        let ctrl = controller();
        assert_eq!(ctrl.repulsion(&clear_scan(90)), Force::ZERO);

        // Exactly at 2 · safety_margin is still outside the influence zone
        let scan = ScanReading::from_ranges(&[6.0, 6.0, 9.0], &[0.3, -2.0, 1.0], 15.0);
        assert_eq!(ctrl.repulsion(&scan), Force::ZERO);
    }

    #[test]
    fn test_repulsion_points_away_from_obstacle() {
        let ctrl = controller();
        let scan = ScanReading::from_ranges(&[2.0], &[FRAC_PI_2], 15.0);
        let rep = ctrl.repulsion(&scan);
        assert_relative_eq!(rep.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(rep.y, -0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_repulsion_range_floor() {
        let ctrl = controller();
        let scan = ScanReading::from_ranges(&[0.0], &[0.0], 15.0);
        let rep = ctrl.repulsion(&scan);
        assert_relative_eq!(rep.length(), 100.0, epsilon = 1e-3);
        assert!(rep.x < 0.0);
    }

    #[test]
    fn test_step_turns_proportionally() {
        let ctrl = controller();
        let pose = Pose2D::new(50.0, 50.0, 0.0);
        let goal = WorldPoint::new(50.0, 90.0);
        let step = ctrl.step(&pose, &clear_scan(8), &goal);

        assert_relative_eq!(step.desired_heading, FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(step.angle_error, FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(step.pose.theta, 0.7 * FRAC_PI_2, epsilon = 1e-6);

        let travelled = step.pose.distance(&pose);
        assert_relative_eq!(travelled, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_full_gain_snaps_heading() {
        let config = ControllerConfig {
            turn_gain: 1.0,
            ..Default::default()
        };
        let ctrl = PotentialFieldController::new(config, NavigationBounds::square(100.0, 2.0));
        let pose = Pose2D::new(10.0, 10.0, -2.0);
        let step = ctrl.step(&pose, &clear_scan(4), &WorldPoint::new(20.0, 20.0));
        assert_relative_eq!(step.pose.theta, FRAC_PI_4, epsilon = 1e-5);
    }

    #[test]
    fn test_goal_behind_gives_positive_pi_error() {
        let ctrl = controller();
        let pose = Pose2D::new(50.0, 50.0, 0.0);
        let step = ctrl.step(&pose, &clear_scan(4), &WorldPoint::new(10.0, 50.0));
        assert!(step.angle_error > -PI && step.angle_error <= PI);
        assert_relative_eq!(step.angle_error.abs(), PI, epsilon = 1e-5);
    }

    #[test]
    fn test_position_clamped_to_interior() {
        let ctrl = controller();
        let pose = Pose2D::new(2.05, 97.95, 3.0 * FRAC_PI_4);
        let step = ctrl.step(&pose, &clear_scan(4), &WorldPoint::new(0.0, 100.0));
        assert_eq!(step.pose.x, 2.0);
        assert_eq!(step.pose.y, 98.0);
    }

    #[test]
    fn test_close_obstacle_deflects_heading() {
        let ctrl = controller();
        let pose = Pose2D::new(50.0, 50.0, 0.0);
        let goal = WorldPoint::new(90.0, 50.0);
        // Obstacle slightly left of straight ahead
        let scan = ScanReading::from_ranges(&[1.0], &[0.2], 15.0);
        let step = ctrl.step(&pose, &scan, &goal);
        assert!(step.desired_heading < 0.0, "should veer right");
    }

    #[test]
    fn test_bounds_helpers() {
        let grid = OccupancyGrid::new(100, 100, 1.0).unwrap();
        let bounds = NavigationBounds::from_grid(&grid, 2.0);
        assert_eq!(bounds, NavigationBounds::square(100.0, 2.0));
        assert!(bounds.is_valid());
        assert!(bounds.contains(WorldPoint::new(2.0, 98.0)));
        assert!(!bounds.contains(WorldPoint::new(1.9, 50.0)));
    }
}
