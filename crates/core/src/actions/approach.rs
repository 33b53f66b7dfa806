use tracing::debug;

use super::walker::{PathWalker, first_reachable, sort_nearest};
use super::{Action, Services, StepStatus, cycle_violation};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::pathfinding::{manhattan, neighbors};
use crate::planner::{ActionName, Predicate};
use crate::types::Pos;
use crate::world::Passability;

/// Walks to a tile orthogonally adjacent to the goal object.
#[derive(Debug, Default)]
pub struct ApproachGoalObject {
    walker: Option<PathWalker>,
}

/// Passable side of the goal object the hero can reach first, nearest by distance.
fn pick_side(hero: &Hero, services: &Services<'_>) -> Result<Pos, ActorError> {
    let goal = services.world.goal_object();
    let mut sides: Vec<Pos> =
        neighbors(goal).into_iter().filter(|tile| services.world.is_passable(*tile)).collect();
    sort_nearest(&mut sides, hero.pos());
    first_reachable(&sides, hero, services)
        .or_else(|| sides.first().copied())
        .ok_or(ActorError::GoalObjectOutOfReach { goal, hero: hero.pos() })
}

impl Action for ApproachGoalObject {
    fn name(&self) -> ActionName {
        ActionName::ApproachGoalObject
    }

    fn is_done(&self, hero: &Hero) -> bool {
        hero.cycle().holds(Predicate::ReachedGoalObject)
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        let goal = services.world.goal_object();
        if manhattan(hero.pos(), goal) != 1 {
            if self.walker.is_none() {
                let side = pick_side(hero, services)?;
                debug!(?goal, ?side, "approaching goal object");
                self.walker = Some(PathWalker::new(side));
            }
            let on_behalf_of = ActionName::ApproachGoalObject;
            if let Some(walker) = &mut self.walker
                && !walker.advance_or_teleport(hero, services, config, on_behalf_of)
            {
                return Ok(StepStatus::InProgress);
            }
        }

        hero.cycle_mut()
            .mark_reached_goal_object()
            .map_err(cycle_violation(ActionName::ApproachGoalObject))?;
        Ok(StepStatus::Done)
    }
}
