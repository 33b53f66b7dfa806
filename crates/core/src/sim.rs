//! Headless harness that owns one actor and the reference collaborators it ticks against.

use tracing::warn;

use crate::actions::Services;
use crate::actor::{Actor, TickOutcome};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::generator::PitGenerator;
use crate::generator::progression::STARTING_LEVEL;
use crate::hero::Hero;
use crate::pathfinding::{GridPathfinder, Pathfinder};
use crate::planner::{ActionName, PredicateSnapshot};
use crate::types::Pos;
use crate::world::{ArenaRegenerator, FifoLevelQueue, Pit};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    CycleCompleted { cycle: u32 },
    BudgetExhausted,
    ActorFailure(ActorError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u64,
    pub stop_reason: AdvanceStopReason,
}

pub struct Simulation<P = GridPathfinder, R = PitGenerator> {
    world: Pit,
    pathfinder: P,
    levels: FifoLevelQueue,
    regenerator: R,
    actor: Actor,
}

impl Simulation {
    /// Starting-level arena from a seeded [`PitGenerator`], hero standing at `spawn`.
    pub fn generated(run_seed: u64, spawn: Pos, config: ActorConfig) -> Self {
        let generator = PitGenerator::new(run_seed);
        let world = Pit::from_layout(generator.generate(STARTING_LEVEL));
        Self::new(world, GridPathfinder, generator, Actor::new(Hero::new(spawn), config))
    }
}

impl<P: Pathfinder, R: ArenaRegenerator> Simulation<P, R> {
    pub fn new(world: Pit, pathfinder: P, regenerator: R, actor: Actor) -> Self {
        Self { world, pathfinder, levels: FifoLevelQueue::new(), regenerator, actor }
    }

    pub fn world(&self) -> &Pit {
        &self.world
    }

    pub fn levels(&self) -> &FifoLevelQueue {
        &self.levels
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn hero(&self) -> &Hero {
        self.actor.hero()
    }

    pub fn snapshot(&self) -> PredicateSnapshot {
        self.actor.snapshot(&self.world)
    }

    pub fn tick(&mut self) -> Result<TickOutcome, ActorError> {
        let mut services = Services {
            world: &mut self.world,
            pathfinder: &self.pathfinder,
            levels: &mut self.levels,
            regenerator: &mut self.regenerator,
        };
        self.actor.tick(&mut services)
    }

    /// Ticks until the current cycle's regeneration completes or `max_ticks` run out.
    pub fn advance(&mut self, max_ticks: u64) -> AdvanceResult {
        let mut ticks = 0;
        while ticks < max_ticks {
            let outcome = self.tick();
            ticks += 1;
            match outcome {
                Ok(TickOutcome::Completed { action: ActionName::RegenerateArena }) => {
                    return AdvanceResult {
                        simulated_ticks: ticks,
                        stop_reason: AdvanceStopReason::CycleCompleted {
                            cycle: self.actor.cycles_completed(),
                        },
                    };
                }
                Ok(_) => {}
                Err(err) => {
                    return AdvanceResult {
                        simulated_ticks: ticks,
                        stop_reason: AdvanceStopReason::ActorFailure(err),
                    };
                }
            }
        }
        warn!(max_ticks, "tick budget exhausted before the cycle completed");
        AdvanceResult { simulated_ticks: ticks, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    /// Ticks until `done` holds, returning the ticks used, or `None` if the budget ran out.
    pub fn run_until(
        &mut self,
        max_ticks: u64,
        mut done: impl FnMut(&Self) -> bool,
    ) -> Result<Option<u64>, ActorError> {
        for ticks in 0..max_ticks {
            if done(self) {
                return Ok(Some(ticks));
            }
            self.tick()?;
        }
        Ok(done(self).then_some(max_ticks))
    }
}
