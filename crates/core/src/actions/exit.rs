use std::collections::BTreeSet;

use tracing::debug;

use super::walker::{PathWalker, first_reachable, sort_nearest};
use super::{Action, Services, StepStatus, cycle_violation};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::pathfinding::neighbors;
use crate::planner::{ActionName, Predicate};
use crate::types::Pos;
use crate::world::Passability;

/// Steps off the edge to the outside tile closest to the regeneration point.
#[derive(Debug, Default)]
pub struct ExitArena {
    walker: Option<PathWalker>,
}

fn outside_tile(hero: &Hero, services: &Services<'_>) -> Option<Pos> {
    let bounds = services.world.bounds();
    let regen = services.world.regeneration_point();
    let is_exit = |tile: &Pos| !bounds.contains(*tile) && services.world.is_passable(*tile);

    let mut adjacent: Vec<Pos> = neighbors(hero.pos()).into_iter().filter(is_exit).collect();
    sort_nearest(&mut adjacent, regen);
    if let Some(tile) = adjacent.first() {
        return Some(*tile);
    }

    let mut ring: Vec<Pos> = bounds
        .edge_tiles()
        .into_iter()
        .flat_map(neighbors)
        .filter(is_exit)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    sort_nearest(&mut ring, regen);
    first_reachable(&ring, hero, services).or_else(|| ring.first().copied())
}

impl Action for ExitArena {
    fn name(&self) -> ActionName {
        ActionName::ExitArena
    }

    fn is_done(&self, hero: &Hero) -> bool {
        hero.cycle().holds(Predicate::OutsideArena)
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        if services.world.bounds().contains(hero.pos()) {
            if self.walker.is_none() {
                let target = outside_tile(hero, services)
                    .unwrap_or_else(|| services.world.regeneration_point());
                debug!(?target, "exit target");
                self.walker = Some(PathWalker::new(target));
            }
            if let Some(walker) = &mut self.walker
                && !walker.advance_or_teleport(hero, services, config, ActionName::ExitArena)
            {
                return Ok(StepStatus::InProgress);
            }
        }

        hero.cycle_mut().mark_exited_arena().map_err(cycle_violation(ActionName::ExitArena))?;
        Ok(StepStatus::Done)
    }
}
