use super::walker::{PathWalker, first_reachable, reveal_around, sort_nearest};
use super::{Action, Services, StepStatus};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::planner::{ActionName, Predicate};
use crate::types::Pos;
use crate::world::Passability;

/// Walks onto the nearest tile inside the arena bounds.
#[derive(Debug, Default)]
pub struct EnterArena {
    walker: Option<PathWalker>,
}

impl EnterArena {
    fn entry_tile(hero: &Hero, services: &Services<'_>) -> Pos {
        let bounds = services.world.bounds();
        let clamped = bounds.clamp(hero.pos());
        if services.world.is_passable(clamped) {
            return clamped;
        }
        let mut edge = bounds.edge_tiles();
        sort_nearest(&mut edge, hero.pos());
        first_reachable(&edge, hero, services).unwrap_or(clamped)
    }
}

impl Action for EnterArena {
    fn name(&self) -> ActionName {
        ActionName::EnterArena
    }

    fn is_done(&self, hero: &Hero) -> bool {
        hero.cycle().holds(Predicate::InsideArena)
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        if !services.world.bounds().contains(hero.pos()) {
            let walker = self
                .walker
                .get_or_insert_with(|| PathWalker::new(Self::entry_tile(hero, services)));
            if !walker.advance_or_teleport(hero, services, config, ActionName::EnterArena) {
                return Ok(StepStatus::InProgress);
            }
        } else {
            reveal_around(hero, services.world, config);
        }

        hero.cycle_mut().mark_entered_arena();
        Ok(StepStatus::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Rig, SCENARIO_SPAWN, run_to_completion, scenario_pit};
    use crate::world::ArenaWorld;

    #[test]
    fn enters_through_the_nearest_edge_tile() {
        let mut rig = Rig::new(scenario_pit());
        let mut hero = Hero::new(SCENARIO_SPAWN);
        let mut action = EnterArena::default();

        let steps =
            run_to_completion(&mut action, &mut hero, &mut rig, &ActorConfig::default(), 10);
        assert_eq!(steps, 1);
        assert_eq!(hero.pos(), Pos { y: 6, x: 1 });
        assert!(rig.world.bounds().contains(hero.pos()));
        assert!(action.is_done(&hero));
    }

    #[test]
    fn blocked_clamp_tile_routes_to_another_edge_tile() {
        let mut pit = scenario_pit();
        pit.set_obstacle(Pos { y: 6, x: 1 }, true);
        let mut rig = Rig::new(pit);
        let mut hero = Hero::new(SCENARIO_SPAWN);

        let config = ActorConfig::default();
        run_to_completion(&mut EnterArena::default(), &mut hero, &mut rig, &config, 10);
        assert!(rig.world.bounds().is_edge(hero.pos()));
        assert_ne!(hero.pos(), Pos { y: 6, x: 1 });
        assert_eq!(hero.teleport_count(), 0);
    }

    #[test]
    fn hero_already_inside_completes_immediately() {
        let mut rig = Rig::new(scenario_pit());
        let mut hero = Hero::new(Pos { y: 4, x: 4 });
        let config = ActorConfig::default();
        let steps = run_to_completion(&mut EnterArena::default(), &mut hero, &mut rig, &config, 1);
        assert_eq!(steps, 1);
        assert_eq!(hero.steps_taken(), 0);
        assert!(!rig.world.has_fog(Pos { y: 4, x: 4 }));
    }
}
