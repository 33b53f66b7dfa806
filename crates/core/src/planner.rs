//! Goal and action selection over a per-tick predicate snapshot.
//! This module exists so the workflow order lives in one static table consulted top-down.
//! It does not execute actions or mutate the hero or the world.

mod ladder;
mod predicate;

pub use ladder::{GOAL_LADDER, LadderRung, select_action, select_goal};
pub use predicate::{Predicate, PredicateSnapshot, build_snapshot};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of every action the ladder can hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionName {
    EnterArena,
    ExploreArena,
    ApproachGoalObject,
    ActivateGoalObject,
    MoveToExitEdge,
    ExitArena,
    RegenerateArena,
}

impl ActionName {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionName::EnterArena => "EnterArena",
            ActionName::ExploreArena => "ExploreArena",
            ActionName::ApproachGoalObject => "ApproachGoalObject",
            ActionName::ActivateGoalObject => "ActivateGoalObject",
            ActionName::MoveToExitEdge => "MoveToExitEdge",
            ActionName::ExitArena => "ExitArena",
            ActionName::RegenerateArena => "RegenerateArena",
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
