pub mod actions;
pub mod actor;
pub mod config;
pub mod coverage;
pub mod cycle;
pub mod error;
pub mod generator;
pub mod hero;
pub mod pathfinding;
pub mod planner;
pub mod sim;
pub mod types;
pub mod world;

#[cfg(test)]
mod test_support;

pub use actions::{Action, Services, StepStatus};
pub use actor::{Actor, ActorEvent, ActorState, TickOutcome};
pub use config::ActorConfig;
pub use coverage::CoverageTracker;
pub use cycle::AgentCycleState;
pub use error::{ActorError, ConfigError, CycleError};
pub use generator::PitGenerator;
pub use hero::Hero;
pub use pathfinding::{GridPathfinder, Pathfinder};
pub use planner::{
    ActionName, GOAL_LADDER, Predicate, PredicateSnapshot, build_snapshot, select_action,
    select_goal,
};
pub use sim::{AdvanceResult, AdvanceStopReason, Simulation};
pub use types::*;
pub use world::{
    ArenaLayout, ArenaRegenerator, ArenaWorld, FifoLevelQueue, LevelQueue, Passability, Pit,
};
