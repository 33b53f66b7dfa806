use tracing::debug;

use super::{ActionName, Predicate, PredicateSnapshot};
use crate::actions::{
    Action, ActivateGoalObject, ApproachGoalObject, EnterArena, ExitArena, ExploreArena,
    MoveToExitEdge, RegenerateArena,
};
use crate::error::ActorError;

#[derive(Clone, Copy, Debug)]
pub struct LadderRung {
    pub goal: Predicate,
    pub action: ActionName,
    build: fn() -> Box<dyn Action>,
}

impl LadderRung {
    pub fn build(&self) -> Box<dyn Action> {
        (self.build)()
    }
}

fn boxed<A: Action + Default + 'static>() -> Box<dyn Action> {
    Box::new(A::default())
}

/// The cycle's workflow, highest priority first.
pub const GOAL_LADDER: [LadderRung; 6] = [
    LadderRung {
        goal: Predicate::InsideArena,
        action: ActionName::EnterArena,
        build: boxed::<EnterArena>,
    },
    LadderRung {
        goal: Predicate::ExploredArena,
        action: ActionName::ExploreArena,
        build: boxed::<ExploreArena>,
    },
    LadderRung {
        goal: Predicate::ReachedGoalObject,
        action: ActionName::ApproachGoalObject,
        build: boxed::<ApproachGoalObject>,
    },
    LadderRung {
        goal: Predicate::ActivatedGoalObject,
        action: ActionName::ActivateGoalObject,
        build: boxed::<ActivateGoalObject>,
    },
    LadderRung {
        goal: Predicate::ReachedExitEdge,
        action: ActionName::MoveToExitEdge,
        build: boxed::<MoveToExitEdge>,
    },
    LadderRung {
        goal: Predicate::OutsideArena,
        action: ActionName::ExitArena,
        build: boxed::<ExitArena>,
    },
];

/// First ladder predicate absent from the snapshot; `None` once the whole cycle holds.
pub fn select_goal(snapshot: &PredicateSnapshot) -> Option<Predicate> {
    GOAL_LADDER.iter().map(|rung| rung.goal).find(|goal| !snapshot.holds(*goal))
}

/// Table lookup from goal to the one action that progresses it; `None` regenerates.
pub fn select_action(
    goal: Option<Predicate>,
    snapshot: &PredicateSnapshot,
) -> Result<Box<dyn Action>, ActorError> {
    let Some(goal) = goal else {
        debug!(action = %ActionName::RegenerateArena, "cycle complete, selecting regeneration");
        return Ok(Box::new(RegenerateArena::default()));
    };
    debug_assert!(!snapshot.holds(goal), "selected goal {goal} already holds");

    let rung = GOAL_LADDER
        .iter()
        .find(|rung| rung.goal == goal)
        .ok_or(ActorError::NoActionForGoal { goal })?;
    debug!(%goal, action = %rung.action, "selected action");
    Ok(rung.build())
}
