use tracing::{debug, info};

use super::walker::{PathWalker, WalkStatus, first_reachable, reveal_around, sort_nearest};
use super::{Action, Services, StepStatus, cycle_violation};
use crate::config::ActorConfig;
use crate::coverage::CoverageTracker;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::pathfinding::neighbors;
use crate::planner::{ActionName, Predicate};
use crate::types::Pos;
use crate::world::Passability;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Sweep,
    Verify,
}

#[derive(Debug)]
struct Target {
    candidate: Pos,
    phase: Phase,
    walker: PathWalker,
}

/// Fog sweep followed by a per-column reachability audit.
#[derive(Debug, Default)]
pub struct ExploreArena {
    coverage: CoverageTracker,
    target: Option<Target>,
    resets_since_progress: u32,
}

impl ExploreArena {
    pub fn coverage(&self) -> &CoverageTracker {
        &self.coverage
    }

    fn next_target(&mut self, hero: &Hero, services: &Services<'_>) -> Option<Target> {
        loop {
            if let Some(candidate) = self.coverage.next_sweep_candidate() {
                match approach_tile(candidate, hero, services) {
                    Some(tile) => {
                        debug!(?candidate, approach = ?tile, "sweep target");
                        return Some(Target {
                            candidate,
                            phase: Phase::Sweep,
                            walker: PathWalker::new(tile),
                        });
                    }
                    None => {
                        debug!(?candidate, "foggy tile has no passable neighbour");
                        self.coverage.mark_collision(candidate);
                        continue;
                    }
                }
            }
            if self.coverage.has_denylisted() {
                let released = self.coverage.clear_denylist();
                self.resets_since_progress += 1;
                debug!(released, resets = self.resets_since_progress, "denylist cleared");
                continue;
            }
            break;
        }

        let tile = self.coverage.next_verify_target(&*services.world)?;
        debug!(?tile, column = tile.x, "verification target");
        Some(Target { candidate: tile, phase: Phase::Verify, walker: PathWalker::new(tile) })
    }

    fn path_failed(
        &mut self,
        target: Target,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) {
        match target.phase {
            Phase::Sweep if self.resets_since_progress >= config.max_denylist_resets => {
                hero.teleport_to(target.walker.target(), ActionName::ExploreArena);
                reveal_around(hero, services.world, config);
                self.arrived(&target, hero);
            }
            Phase::Sweep => self.coverage.denylist(target.candidate),
            Phase::Verify => self.coverage.verify_failed(target.candidate),
        }
    }

    /// A sweep candidate reached from beside stays fogged when the clear radius cannot
    /// cover it, so it is settled here instead of being offered again.
    fn arrived(&mut self, target: &Target, hero: &Hero) {
        self.coverage.record_arrival(hero.pos());
        if target.phase == Phase::Sweep && target.candidate != hero.pos() {
            self.coverage.mark_collision(target.candidate);
        }
        self.resets_since_progress = 0;
    }
}

/// The candidate itself when passable, else its passable neighbour the hero can reach first.
fn approach_tile(candidate: Pos, hero: &Hero, services: &Services<'_>) -> Option<Pos> {
    if services.world.is_passable(candidate) {
        return Some(candidate);
    }
    let mut options: Vec<Pos> =
        neighbors(candidate).into_iter().filter(|tile| services.world.is_passable(*tile)).collect();
    sort_nearest(&mut options, hero.pos());
    first_reachable(&options, hero, services).or_else(|| options.first().copied())
}

impl Action for ExploreArena {
    fn name(&self) -> ActionName {
        ActionName::ExploreArena
    }

    fn is_done(&self, hero: &Hero) -> bool {
        hero.cycle().holds(Predicate::ExploredArena)
    }

    fn step(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> Result<StepStatus, ActorError> {
        if !self.coverage.is_populated() {
            self.coverage.populate(&*services.world);
        }
        if self.coverage.refresh(&*services.world) > 0 {
            self.resets_since_progress = 0;
        }

        if let Some(target) = &self.target
            && target.phase == Phase::Sweep
            && !self.coverage.is_unvisited(target.candidate)
        {
            debug!(candidate = ?target.candidate, "fog cleared before arrival, retargeting");
            self.target = None;
        }

        let mut target = match self.target.take() {
            Some(target) => target,
            None => match self.next_target(hero, services) {
                Some(target) => target,
                None => {
                    hero.cycle_mut()
                        .mark_explored_arena()
                        .map_err(cycle_violation(ActionName::ExploreArena))?;
                    info!(
                        visited = self.coverage.visited_count(),
                        unreachable_columns = self.coverage.unreachable_columns().count(),
                        "arena explored"
                    );
                    return Ok(StepStatus::Done);
                }
            },
        };

        match target.walker.advance(hero, services, config) {
            WalkStatus::Moving => self.target = Some(target),
            WalkStatus::Arrived => self.arrived(&target, hero),
            WalkStatus::NoPath { .. } => self.path_failed(target, hero, services, config),
        }
        Ok(StepStatus::InProgress)
    }
}
