//! Invariants of the sensing and control step over many inputs.

mod common;

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;
use marga::{
    ControllerConfig, LidarSimulator, NavigationBounds, OccupancyGrid, Pose2D,
    PotentialFieldController, ScanReading, WorldPoint, normalize_angle,
};

use common::{default_angles, wall_grid};

fn controller(config: ControllerConfig) -> PotentialFieldController {
    PotentialFieldController::new(config, NavigationBounds::square(100.0, 2.0))
}

/// Deterministic spread of poses, including the map edges
fn sample_poses() -> Vec<Pose2D> {
    let mut poses = Vec::new();
    for xi in 0..=10 {
        for yi in 0..=10 {
            for ti in 0..8 {
                poses.push(Pose2D::new(
                    xi as f32 * 10.0,
                    yi as f32 * 10.0,
                    ti as f32 * TAU / 8.0 - PI + 0.1,
                ));
            }
        }
    }
    poses
}

#[test]
fn test_step_clamps_into_bounds() {
    let grid = wall_grid(100, 50);
    let lidar = LidarSimulator::new();
    let angles = default_angles();
    let ctrl = controller(ControllerConfig {
        speed: 5.0,
        ..Default::default()
    });
    let goals = [WorldPoint::new(0.0, 0.0), WorldPoint::new(100.0, 100.0)];

    for pose in sample_poses() {
        let scan = lidar.scan(&grid, &pose, &angles, 15.0);
        for goal in &goals {
            let step = ctrl.step(&pose, &scan, goal);
            let p = step.pose.position();
            assert!(
                (2.0..=98.0).contains(&p.x) && (2.0..=98.0).contains(&p.y),
                "pose {:?} stepped out to {:?}",
                pose,
                p
            );
        }
    }
}

#[test]
fn test_angle_error_in_half_open_range() {
    let grid = wall_grid(100, 30);
    let lidar = LidarSimulator::new();
    let angles = default_angles();
    let ctrl = controller(ControllerConfig::default());
    let goal = WorldPoint::new(90.0, 10.0);

    for pose in sample_poses() {
        let scan = lidar.scan(&grid, &pose, &angles, 15.0);
        let step = ctrl.step(&pose, &scan, &goal);
        assert!(
            step.angle_error > -PI && step.angle_error <= PI,
            "error {} out of range",
            step.angle_error
        );
        assert!(step.pose.theta > -PI && step.pose.theta <= PI);
    }
}

#[test]
fn test_no_repulsion_at_or_beyond_influence_range() {
    let ctrl = controller(ControllerConfig::default());
    let threshold = ctrl.config().influence_range();

    for range in [threshold, threshold + 0.01, 10.0, 15.0] {
        let angles: Vec<f32> = (0..36).map(|i| i as f32 * TAU / 36.0).collect();
        let scan = ScanReading::from_ranges(&vec![range; 36], &angles, 15.0);
        let repulsion = ctrl.repulsion(&scan);
        assert_eq!(repulsion, WorldPoint::ZERO, "range {}", range);
    }
}

#[test]
fn test_repulsion_floor_bounds_single_ray() {
    let ctrl = controller(ControllerConfig::default());
    let scan = ScanReading::from_ranges(&[0.0], &[0.0], 15.0);
    let repulsion = ctrl.repulsion(&scan);

    // 1 / 0.1² pushing along angle + π
    assert_relative_eq!(repulsion.length(), 100.0, epsilon = 1e-2);
    assert!(repulsion.x < 0.0);
}

#[test]
fn test_empty_grid_scan_is_all_max_range() {
    let grid = OccupancyGrid::new(100, 100, 1.0).unwrap();
    let lidar = LidarSimulator::new();
    let angles = default_angles();

    for pose in sample_poses().into_iter().filter(|p| grid.contains_world(p.position())) {
        let scan = lidar.scan(&grid, &pose, &angles, 15.0);
        assert_eq!(scan.len(), 90);
        assert!(scan.iter().all(|e| e.range == 15.0));
    }
}

#[test]
fn test_scan_ranges_within_limits_and_in_order() {
    let grid = wall_grid(100, 50);
    let lidar = LidarSimulator::new();
    let angles = default_angles();
    let pose = Pose2D::new(45.0, 50.0, 0.3);

    let scan = lidar.scan(&grid, &pose, &angles, 15.0);
    assert_eq!(scan.len(), angles.len());
    for (entry, offset) in scan.iter().zip(angles.offsets()) {
        assert!((0.0..=15.0).contains(&entry.range));
        assert_relative_eq!(entry.angle, normalize_angle(pose.theta + offset), epsilon = 1e-5);
    }
    // Straight ahead the wall face is 5 away along a ray tilted by 0.3 rad
    assert_relative_eq!(scan.entries()[0].range, 5.0 / 0.3f32.cos(), epsilon = 1e-3);
}

#[test]
fn test_ray_intersection_is_idempotent() {
    let grid = wall_grid(60, 40);
    let origin = WorldPoint::new(20.5, 30.5);

    for i in 0..72 {
        let angle = i as f32 * TAU / 72.0;
        let a = grid.ray_intersection(origin, angle, 25.0);
        let b = grid.ray_intersection(origin, angle, 25.0);
        assert_eq!(a, b);
    }
}

#[test]
fn test_heading_converges_on_empty_grid() {
    let grid = OccupancyGrid::new(100, 100, 1.0).unwrap();
    let lidar = LidarSimulator::new();
    let angles = default_angles();
    let ctrl = controller(ControllerConfig::default());
    let goal = WorldPoint::new(90.0, 10.0);

    let mut pose = Pose2D::new(10.0, 90.0, FRAC_PI_2);
    let mut last_error = f32::INFINITY;
    for _ in 0..30 {
        let scan = lidar.scan(&grid, &pose, &angles, 15.0);
        let step = ctrl.step(&pose, &scan, &goal);
        assert_eq!(step.repulsion, WorldPoint::ZERO);
        // Goal bearing drifts slightly as the robot moves
        assert!(step.angle_error.abs() <= last_error + 1e-3);
        last_error = step.angle_error.abs();
        pose = step.pose;
    }
    assert!(last_error < 1e-2);
}

#[test]
fn test_unit_turn_gain_faces_goal_in_one_step() {
    let grid = OccupancyGrid::new(100, 100, 1.0).unwrap();
    let lidar = LidarSimulator::new();
    let ctrl = controller(ControllerConfig {
        turn_gain: 1.0,
        ..Default::default()
    });
    let pose = Pose2D::new(10.0, 90.0, FRAC_PI_2);
    let goal = WorldPoint::new(90.0, 10.0);

    let scan = lidar.scan(&grid, &pose, &default_angles(), 15.0);
    let step = ctrl.step(&pose, &scan, &goal);
    assert_relative_eq!(step.pose.theta, -PI / 4.0, epsilon = 1e-5);
}
