use tracing::info;

use super::{Action, Services, StepStatus, cycle_violation};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::pathfinding::manhattan;
use crate::planner::{ActionName, Predicate};

/// Activates the adjacent goal object and queues the next difficulty.
#[derive(Debug, Default)]
pub struct ActivateGoalObject;

impl Action for ActivateGoalObject {
    fn name(&self) -> ActionName {
        ActionName::ActivateGoalObject
    }

    fn is_done(&self, hero: &Hero) -> bool {
        hero.cycle().holds(Predicate::ActivatedGoalObject)
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        let goal = services.world.goal_object();
        if manhattan(hero.pos(), goal) != 1 {
            return Err(ActorError::GoalObjectOutOfReach { goal, hero: hero.pos() });
        }
        hero.cycle_mut()
            .mark_activated_goal_object()
            .map_err(cycle_violation(ActionName::ActivateGoalObject))?;

        if !services.world.is_goal_object_activated() {
            services.world.activate_goal_object();
            let next_level = services.world.level().saturating_add(config.level_step);
            services.levels.queue_level(next_level);
            info!(?goal, next_level, "goal object activated");
        }
        Ok(StepStatus::Done)
    }
}
