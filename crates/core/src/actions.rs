//! Atomic units of work the actor drives one step per tick.
//! This module exists so each workflow step is its own type behind one polymorphic seam.
//! It does not choose which action runs next; the planner does.

mod activate;
mod approach;
mod edge;
mod enter;
mod exit;
mod explore;
mod regenerate;
mod walker;

pub use activate::ActivateGoalObject;
pub use approach::ApproachGoalObject;
pub use edge::MoveToExitEdge;
pub use enter::EnterArena;
pub use exit::ExitArena;
pub use explore::ExploreArena;
pub use regenerate::RegenerateArena;

use std::fmt::Debug;

use tracing::error;

use crate::config::ActorConfig;
use crate::error::{ActorError, CycleError};
use crate::hero::Hero;
use crate::pathfinding::Pathfinder;
use crate::planner::ActionName;
use crate::world::{ArenaRegenerator, ArenaWorld, LevelQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    InProgress,
    Done,
}

/// Collaborators handed to every step; nothing is looked up ambiently.
pub struct Services<'a> {
    pub world: &'a mut dyn ArenaWorld,
    pub pathfinder: &'a dyn Pathfinder,
    pub levels: &'a mut dyn LevelQueue,
    pub regenerator: &'a mut dyn ArenaRegenerator,
}

pub trait Action: Debug {
    fn name(&self) -> ActionName;

    /// Completion test against the hero's cycle flags.
    fn is_done(&self, hero: &Hero) -> bool;

    /// Advances by at most one hero move.
    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError>;
}

/// Maps a cycle-flag transition failure onto the action that attempted it.
pub(crate) fn cycle_violation(
    action: ActionName,
) -> impl FnOnce(CycleError) -> ActorError {
    move |source| {
        error!(%action, %source, "cycle flag set out of order");
        ActorError::Cycle { action, source }
    }
}
