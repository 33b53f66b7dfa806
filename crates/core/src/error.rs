//! Error types raised by the behavior core.
//!
//! Recoverable navigation trouble (no path, stalled exploration) is handled inside the actions
//! and never shows up here. These variants mark contract violations between the planner, the
//! actions and the cycle state.

use thiserror::Error;

use crate::planner::{ActionName, Predicate};
use crate::types::Pos;

/// Out-of-order transition on the per-cycle flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot set {flag} before {requires}")]
pub struct CycleError {
    pub flag: Predicate,
    pub requires: Predicate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorError {
    #[error("PerformAction reached with no current action")]
    NoCurrentAction,

    #[error("{action} violated the cycle order: {source}")]
    Cycle {
        action: ActionName,
        #[source]
        source: CycleError,
    },

    #[error("goal object at {goal:?} is not adjacent to the hero at {hero:?}")]
    GoalObjectOutOfReach { goal: Pos, hero: Pos },

    #[error("{goal} is not a ladder goal")]
    NoActionForGoal { goal: Predicate },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config field `{field}` must be greater than zero")]
    Zero { field: &'static str },

    #[error("config field `{field}` must not be negative")]
    Negative { field: &'static str },
}
