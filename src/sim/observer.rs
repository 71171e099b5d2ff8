//! Push-only observers for rendering and recording.
//!
//! Observers receive the pose after every tick and never feed anything back
//! into the loop.

use log::info;

use crate::core::{Pose2D, WorldPoint};

use super::state::SimulationState;

/// Snapshot pushed to observers after each tick
#[derive(Clone, Copy, Debug)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: usize,
    /// Pose after the tick (robot marker)
    pub pose: Pose2D,
    /// New point on the path history
    pub path_point: WorldPoint,
    /// Distance from the new pose to the goal
    pub distance_to_goal: f32,
    /// Shortest lidar range seen this tick
    pub min_range: Option<f32>,
}

/// Receiver for per-tick simulation updates
pub trait SimulationObserver {
    /// Called after every pose update
    fn on_tick(&mut self, report: &TickReport);

    /// Called once when the loop enters a terminal state
    fn on_finish(&mut self, _state: SimulationState, _ticks: usize) {}
}

/// Observer that ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl SimulationObserver for NullObserver {
    fn on_tick(&mut self, _report: &TickReport) {}
}

/// Collects the pushed poses
#[derive(Clone, Debug, Default)]
pub struct TrajectoryRecorder {
    /// Robot poses, one per tick
    pub poses: Vec<Pose2D>,
    /// Terminal state, once reached
    pub finished: Option<SimulationState>,
}

impl TrajectoryRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded path points
    pub fn path(&self) -> Vec<WorldPoint> {
        self.poses.iter().map(|p| p.position()).collect()
    }
}

impl SimulationObserver for TrajectoryRecorder {
    fn on_tick(&mut self, report: &TickReport) {
        self.poses.push(report.pose);
    }

    fn on_finish(&mut self, state: SimulationState, _ticks: usize) {
        self.finished = Some(state);
    }
}

/// Logs progress every `interval` ticks
#[derive(Clone, Copy, Debug)]
pub struct LogObserver {
    interval: usize,
}

impl LogObserver {
    /// Create a logger reporting every `interval` ticks (minimum 1)
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SimulationObserver for LogObserver {
    fn on_tick(&mut self, report: &TickReport) {
        if report.tick % self.interval == 0 {
            info!(
                "[tick {}] pose=({:.2}, {:.2}, {:.1}°) goal_dist={:.2} min_range={}",
                report.tick,
                report.pose.x,
                report.pose.y,
                report.pose.theta.to_degrees(),
                report.distance_to_goal,
                report
                    .min_range
                    .map(|r| format!("{:.2}", r))
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }

    fn on_finish(&mut self, state: SimulationState, ticks: usize) {
        info!("Simulation finished: {} after {} ticks", state, ticks);
    }
}
