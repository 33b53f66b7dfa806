use tracing::debug;

use super::walker::{PathWalker, first_reachable, sort_nearest};
use super::{Action, Services, StepStatus, cycle_violation};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::planner::{ActionName, Predicate};
use crate::types::Pos;
use crate::world::Passability;

/// Walks to the inside-edge tile closest to the regeneration point.
#[derive(Debug, Default)]
pub struct MoveToExitEdge {
    walker: Option<PathWalker>,
}

fn exit_edge_tile(hero: &Hero, services: &Services<'_>) -> Option<Pos> {
    let mut edge: Vec<Pos> = services
        .world
        .bounds()
        .edge_tiles()
        .into_iter()
        .filter(|tile| services.world.is_passable(*tile))
        .collect();
    sort_nearest(&mut edge, services.world.regeneration_point());
    first_reachable(&edge, hero, services).or_else(|| edge.first().copied())
}

impl Action for MoveToExitEdge {
    fn name(&self) -> ActionName {
        ActionName::MoveToExitEdge
    }

    fn is_done(&self, hero: &Hero) -> bool {
        hero.cycle().holds(Predicate::ReachedExitEdge)
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        if self.walker.is_none() {
            // An arena with no passable edge tile leaves the hero where it stands.
            let target = exit_edge_tile(hero, services).unwrap_or(hero.pos());
            debug!(?target, "exit edge target");
            self.walker = Some(PathWalker::new(target));
        }
        if let Some(walker) = &mut self.walker
            && !walker.advance_or_teleport(hero, services, config, ActionName::MoveToExitEdge)
        {
            return Ok(StepStatus::InProgress);
        }

        hero.cycle_mut()
            .mark_reached_exit_edge()
            .map_err(cycle_violation(ActionName::MoveToExitEdge))?;
        Ok(StepStatus::Done)
    }
}
