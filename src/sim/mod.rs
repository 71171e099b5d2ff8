//! Closed-loop simulation.
//!
//! Each tick runs scan → control step → pose update → observer push →
//! termination check, strictly in that order and to completion before the
//! next tick starts.
//!
//! ```text
//!              ┌────────────┐ distance < goal_radius ┌──────────────┐
//!   start ───► │  Running   │ ─────────────────────► │ GoalReached  │
//!              │            │                        └──────────────┘
//!              │            │ ticks == budget        ┌──────────────────┐
//!              │            │ ─────────────────────► │ BudgetExhausted  │
//!              └────────────┘                        └──────────────────┘
//! ```
//!
//! The grid is borrowed shared for the whole run; the pose is owned by the
//! loop. Several loops can share one grid, one per robot.

mod metrics;
mod observer;
mod runner;
mod state;

pub use metrics::TrajectoryMetrics;
pub use observer::{LogObserver, NullObserver, SimulationObserver, TickReport, TrajectoryRecorder};
pub use runner::{LoopSettings, SimulationLoop, SimulationOutcome};
pub use state::SimulationState;
