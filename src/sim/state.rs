//! Simulation state machine states.

use serde::{Deserialize, Serialize};

/// Simulation loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
    /// Ticking towards the goal
    Running,
    /// Robot came within the goal radius
    GoalReached,
    /// Iteration budget used up before reaching the goal.
    ///
    /// A normal outcome, not an error.
    BudgetExhausted,
}

impl SimulationState {
    /// Is this a terminal state?
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SimulationState::Running)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SimulationState::Running => "Running",
            SimulationState::GoalReached => "GoalReached",
            SimulationState::BudgetExhausted => "BudgetExhausted",
        }
    }
}

impl std::fmt::Display for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
