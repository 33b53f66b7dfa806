use tracing::{debug, info, warn};

use super::walker::PathWalker;
use super::{Action, Services, StepStatus};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::planner::ActionName;

/// Walks to the regeneration point, rebuilds the arena at the queued level and starts a
/// new cycle.
#[derive(Debug, Default)]
pub struct RegenerateArena {
    walker: Option<PathWalker>,
}

impl Action for RegenerateArena {
    fn name(&self) -> ActionName {
        ActionName::RegenerateArena
    }

    /// Never true on its own; completion is reported by the step that resets the cycle.
    fn is_done(&self, _hero: &Hero) -> bool {
        false
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        let walker = self
            .walker
            .get_or_insert_with(|| PathWalker::new(services.world.regeneration_point()));
        if !walker.advance_or_teleport(hero, services, config, ActionName::RegenerateArena) {
            return Ok(StepStatus::InProgress);
        }

        let previous = services.world.level();
        let level = match services.levels.dequeue_level() {
            Some(level) => level,
            None => {
                let fallback = previous.saturating_add(config.level_step);
                warn!(previous, fallback, "level queue empty at regeneration");
                fallback
            }
        };
        let layout = services.regenerator.regenerate_for_level(level);
        debug!(?layout.bounds, goal_object = ?layout.goal_object, "installing layout");
        services.world.install_layout(layout);
        hero.cycle_mut().reset_for_new_cycle();
        info!(previous, level, "arena regenerated");
        Ok(StepStatus::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::GOAL_LADDER;
    use crate::test_support::{Rig, SCENARIO_REGEN, run_to_completion, scenario_pit};
    use crate::types::Pos;
    use crate::world::{ArenaWorld, LevelQueue};

    fn finished_hero(pos: Pos) -> Hero {
        let mut hero = Hero::new(pos);
        let cycle = hero.cycle_mut();
        cycle.mark_entered_arena();
        cycle.mark_explored_arena().expect("explored");
        cycle.mark_reached_goal_object().expect("reached");
        cycle.mark_activated_goal_object().expect("activated");
        cycle.mark_reached_exit_edge().expect("edge");
        cycle.mark_exited_arena().expect("exited");
        hero
    }

    #[test]
    fn regenerates_at_the_queued_level_and_resets_the_cycle() {
        let mut rig = Rig::new(scenario_pit());
        rig.world.activate_goal_object();
        rig.levels.queue_level(2);
        let mut hero = finished_hero(Pos { y: 1, x: 1 });
        let config = ActorConfig::default();

        let mut action = RegenerateArena::default();
        let steps = run_to_completion(&mut action, &mut hero, &mut rig, &config, 10);
        assert_eq!(steps, 2);
        assert_eq!(hero.pos(), SCENARIO_REGEN);
        assert_eq!(rig.regenerator.requested, vec![2]);
        assert_eq!(rig.world.level(), 2);
        assert!(!rig.world.is_goal_object_activated());
        assert!(!rig.levels.has_queued_level());
        assert!(GOAL_LADDER.iter().all(|rung| !hero.cycle().holds(rung.goal)));
    }

    #[test]
    fn empty_queue_falls_back_to_the_next_level() {
        let mut rig = Rig::new(scenario_pit());
        let mut hero = finished_hero(SCENARIO_REGEN);
        let config = ActorConfig { level_step: 3, ..ActorConfig::default() };

        run_to_completion(&mut RegenerateArena::default(), &mut hero, &mut rig, &config, 1);
        assert_eq!(rig.regenerator.requested, vec![4]);
        assert_eq!(rig.world.level(), 4);
    }
}
