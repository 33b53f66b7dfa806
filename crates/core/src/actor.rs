//! Tick-driven Idle/PerformAction control loop that owns the active action.
//! This module exists so planning happens only in Idle and every tick does one unit of work.
//! It does not know how any individual action moves the hero.

use std::hash::Hasher;

use serde::Serialize;
use tracing::{debug, error, info};
use xxhash_rust::xxh3::Xxh3;

use crate::actions::{Action, Services, StepStatus};
use crate::config::ActorConfig;
use crate::error::ActorError;
use crate::hero::Hero;
use crate::planner::{
    ActionName, Predicate, PredicateSnapshot, build_snapshot, select_action, select_goal,
};
use crate::world::ArenaWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ActorState {
    Idle,
    PerformAction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Idle tick: a goal (`None` means regeneration) and its action were chosen.
    Planned { goal: Option<Predicate>, action: ActionName },
    InProgress { action: ActionName },
    Completed { action: ActionName },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActorEvent {
    GoalSelected { tick: u64, goal: Option<Predicate> },
    ActionStarted { tick: u64, action: ActionName },
    ActionCompleted { tick: u64, action: ActionName },
    CycleCompleted { tick: u64, cycle: u32, level: u32 },
}

#[derive(Debug)]
pub struct Actor {
    hero: Hero,
    config: ActorConfig,
    state: ActorState,
    current: Option<Box<dyn Action>>,
    tick: u64,
    cycles_completed: u32,
    log: Vec<ActorEvent>,
}

impl Actor {
    pub fn new(hero: Hero, config: ActorConfig) -> Self {
        Self {
            hero,
            config,
            state: ActorState::Idle,
            current: None,
            tick: 0,
            cycles_completed: 0,
            log: Vec::new(),
        }
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn config(&self) -> &ActorConfig {
        &self.config
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn current_action(&self) -> Option<ActionName> {
        self.current.as_ref().map(|action| action.name())
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    pub fn log(&self) -> &[ActorEvent] {
        &self.log
    }

    pub fn snapshot(&self, world: &dyn ArenaWorld) -> PredicateSnapshot {
        build_snapshot(&self.hero, world)
    }

    /// One unit of work: plan when idle, otherwise step the current action once.
    ///
    /// On error the current action is discarded and the actor returns to Idle.
    pub fn tick(&mut self, services: &mut Services<'_>) -> Result<TickOutcome, ActorError> {
        let result = match self.state {
            ActorState::Idle => self.plan(services),
            ActorState::PerformAction => self.perform(services),
        };
        self.tick += 1;
        if let Err(err) = &result {
            error!(tick = self.tick, %err, "actor contract violation, returning to idle");
            self.current = None;
            self.state = ActorState::Idle;
        }
        result
    }

    fn plan(&mut self, services: &mut Services<'_>) -> Result<TickOutcome, ActorError> {
        let snapshot = build_snapshot(&self.hero, &*services.world);
        let goal = select_goal(&snapshot);
        let action = select_action(goal, &snapshot)?;
        let name = action.name();
        debug!(tick = self.tick, ?goal, action = %name, "planned");

        self.log.push(ActorEvent::GoalSelected { tick: self.tick, goal });
        self.log.push(ActorEvent::ActionStarted { tick: self.tick, action: name });
        self.current = Some(action);
        self.state = ActorState::PerformAction;
        Ok(TickOutcome::Planned { goal, action: name })
    }

    fn perform(&mut self, services: &mut Services<'_>) -> Result<TickOutcome, ActorError> {
        let action = self.current.as_mut().ok_or(ActorError::NoCurrentAction)?;
        let name = action.name();
        let status = if action.is_done(&self.hero) {
            StepStatus::Done
        } else {
            action.step(&mut self.hero, services, &self.config)?
        };
        if status == StepStatus::InProgress {
            return Ok(TickOutcome::InProgress { action: name });
        }

        self.current = None;
        self.state = ActorState::Idle;
        self.log.push(ActorEvent::ActionCompleted { tick: self.tick, action: name });
        if name == ActionName::RegenerateArena {
            self.cycles_completed += 1;
            let level = services.world.level();
            info!(tick = self.tick, cycle = self.cycles_completed, level, "cycle completed");
            self.log.push(ActorEvent::CycleCompleted {
                tick: self.tick,
                cycle: self.cycles_completed,
                level,
            });
        }
        Ok(TickOutcome::Completed { action: name })
    }

    /// Removes the actor; any in-flight action is dropped without another step.
    pub fn despawn(self) -> Hero {
        if let Some(action) = &self.current {
            debug!(action = %action.name(), "despawned mid-action");
        }
        self.hero
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.tick);
        hasher.write_u32(self.cycles_completed);
        hasher.write_i32(self.hero.pos().x);
        hasher.write_i32(self.hero.pos().y);
        hasher.write_u8(self.hero.cycle().bits());
        hasher.write_u32(self.hero.teleport_count());
        hasher.write_u8(match self.state {
            ActorState::Idle => 0,
            ActorState::PerformAction => 1,
        });
        if let Some(action) = &self.current {
            hasher.write_u8(action.name() as u8);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests;
