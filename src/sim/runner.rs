//! Simulation loop implementation.

use log::{debug, info};

use crate::control::PotentialFieldController;
use crate::core::{Pose2D, WorldPoint};
use crate::error::{Error, Result};
use crate::grid::OccupancyGrid;
use crate::sensor::{LidarSimulator, ScanAngles};

use super::observer::{SimulationObserver, TickReport};
use super::state::SimulationState;

/// Per-run loop parameters
#[derive(Clone, Debug, PartialEq)]
pub struct LoopSettings {
    /// Relative lidar angles, in scan order
    pub scan_angles: ScanAngles,
    /// Lidar maximum range
    pub max_scan_range: f32,
    /// Goal counts as reached strictly inside this distance
    pub goal_radius: f32,
    /// Maximum number of ticks
    pub iteration_budget: usize,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            scan_angles: ScanAngles::full_circle(90),
            max_scan_range: 15.0,
            goal_radius: 8.0,
            iteration_budget: 2000,
        }
    }
}

impl LoopSettings {
    /// Reject settings that cannot drive a run
    pub fn validate(&self) -> Result<()> {
        if self.scan_angles.is_empty() {
            return Err(Error::invalid("scan angle set must not be empty"));
        }
        if self.scan_angles.offsets().iter().any(|a| !a.is_finite()) {
            return Err(Error::invalid("scan angles must be finite"));
        }
        if !self.max_scan_range.is_finite() || self.max_scan_range <= 0.0 {
            return Err(Error::invalid(format!(
                "max scan range must be > 0, got {}",
                self.max_scan_range
            )));
        }
        if !self.goal_radius.is_finite() || self.goal_radius <= 0.0 {
            return Err(Error::invalid(format!(
                "goal radius must be > 0, got {}",
                self.goal_radius
            )));
        }
        if self.iteration_budget == 0 {
            return Err(Error::invalid("iteration budget must be > 0"));
        }
        Ok(())
    }
}

/// Final result of a run
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    /// Terminal state
    pub state: SimulationState,
    /// Number of pose updates performed
    pub ticks: usize,
    /// Pose when the loop stopped
    pub final_pose: Pose2D,
    /// Distance from the final pose to the goal
    pub final_distance: f32,
    /// Start pose followed by one pose per tick
    pub trajectory: Vec<Pose2D>,
}

impl SimulationOutcome {
    /// Did the robot reach the goal?
    pub fn is_goal_reached(&self) -> bool {
        self.state == SimulationState::GoalReached
    }
}

/// Drives the observe/act cycle for one robot.
pub struct SimulationLoop<'a> {
    /// Shared, read-only map
    grid: &'a OccupancyGrid,
    lidar: LidarSimulator,
    controller: PotentialFieldController,
    settings: LoopSettings,
    goal: WorldPoint,
    /// Current pose, owned exclusively by the loop
    pose: Pose2D,
    state: SimulationState,
    ticks: usize,
    trajectory: Vec<Pose2D>,
}

impl<'a> SimulationLoop<'a> {
    /// Create a loop in the `Running` state.
    ///
    /// Fails with `InvalidConfiguration` if the settings or controller
    /// parameters are out of range, or start/goal lie outside the grid.
    pub fn new(
        grid: &'a OccupancyGrid,
        controller: PotentialFieldController,
        settings: LoopSettings,
        start: Pose2D,
        goal: WorldPoint,
    ) -> Result<Self> {
        settings.validate()?;
        controller.config().validate()?;

        if !controller.bounds().is_valid() {
            return Err(Error::invalid("navigation bounds are empty"));
        }
        if !grid.contains_world(start.position()) {
            return Err(Error::invalid(format!(
                "start ({:.2}, {:.2}) is outside the grid",
                start.x, start.y
            )));
        }
        if !grid.contains_world(goal) {
            return Err(Error::invalid(format!(
                "goal ({:.2}, {:.2}) is outside the grid",
                goal.x, goal.y
            )));
        }

        debug!(
            "Simulation loop: start=({:.2}, {:.2}, {:.3}) goal=({:.2}, {:.2}) budget={}",
            start.x, start.y, start.theta, goal.x, goal.y, settings.iteration_budget
        );

        let mut trajectory = Vec::with_capacity(settings.iteration_budget.min(1 << 16) + 1);
        trajectory.push(start);

        Ok(Self {
            grid,
            lidar: LidarSimulator::new(),
            controller,
            settings,
            goal,
            pose: start,
            state: SimulationState::Running,
            ticks: 0,
            trajectory,
        })
    }

    /// Current pose
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    /// Goal point
    pub fn goal(&self) -> WorldPoint {
        self.goal
    }

    /// Current state
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Ticks performed so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Start pose followed by every pose update so far
    pub fn trajectory(&self) -> &[Pose2D] {
        &self.trajectory
    }

    /// Loop settings
    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    /// Run a single tick.
    ///
    /// No-op once a terminal state has been reached.
    pub fn tick(&mut self, observer: &mut dyn SimulationObserver) -> SimulationState {
        if self.state.is_terminal() {
            return self.state;
        }

        let scan = self.lidar.scan(
            self.grid,
            &self.pose,
            &self.settings.scan_angles,
            self.settings.max_scan_range,
        );
        let step = self.controller.step(&self.pose, &scan, &self.goal);

        self.pose = step.pose;
        self.ticks += 1;
        self.trajectory.push(self.pose);

        let distance_to_goal = self.pose.distance_to(&self.goal);
        observer.on_tick(&TickReport {
            tick: self.ticks,
            pose: self.pose,
            path_point: self.pose.position(),
            distance_to_goal,
            min_range: scan.min_range(),
        });

        if distance_to_goal < self.settings.goal_radius {
            self.state = SimulationState::GoalReached;
        } else if self.ticks >= self.settings.iteration_budget {
            self.state = SimulationState::BudgetExhausted;
        }

        if self.state.is_terminal() {
            info!(
                "{} after {} ticks at ({:.2}, {:.2}), {:.2} from goal",
                self.state, self.ticks, self.pose.x, self.pose.y, distance_to_goal
            );
            observer.on_finish(self.state, self.ticks);
        }

        self.state
    }

    /// Tick until a terminal state and return the outcome
    pub fn run(mut self, observer: &mut dyn SimulationObserver) -> SimulationOutcome {
        while !self.tick(observer).is_terminal() {}
        self.into_outcome()
    }

    /// Consume the loop into its outcome (state may still be `Running`)
    pub fn into_outcome(self) -> SimulationOutcome {
        SimulationOutcome {
            state: self.state,
            ticks: self.ticks,
            final_pose: self.pose,
            final_distance: self.pose.distance_to(&self.goal),
            trajectory: self.trajectory,
        }
    }
}
