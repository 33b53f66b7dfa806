//! Shared fixtures for the unit test suites.
//! This module exists to avoid repeating arena and collaborator setup across many tests.
//! It does not own production behavior.

use std::collections::BTreeSet;

use crate::actions::{Action, Services, StepStatus};
use crate::config::ActorConfig;
use crate::hero::Hero;
use crate::pathfinding::GridPathfinder;
use crate::types::{ArenaBounds, Pos};
use crate::world::{ArenaLayout, ArenaRegenerator, FifoLevelQueue, Passability, Pit};

/// Passability from ASCII rows; `#` marks a wall, anything else is open.
pub(crate) struct RowGrid {
    width: i32,
    height: i32,
    walls: BTreeSet<Pos>,
}

impl Passability for RowGrid {
    fn is_passable(&self, tile: Pos) -> bool {
        tile.x >= 0
            && tile.y >= 0
            && tile.x < self.width
            && tile.y < self.height
            && !self.walls.contains(&tile)
    }
}

pub(crate) fn grid_from_rows(rows: &[&str]) -> RowGrid {
    let mut walls = BTreeSet::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, cell) in row.chars().enumerate() {
            if cell == '#' {
                walls.insert(Pos { y: y as i32, x: x as i32 });
            }
        }
    }
    RowGrid {
        width: rows.first().map_or(0, |row| row.len() as i32),
        height: rows.len() as i32,
        walls,
    }
}

pub(crate) const SCENARIO_GOAL: Pos = Pos { y: 6, x: 6 };
pub(crate) const SCENARIO_REGEN: Pos = Pos { y: 0, x: 0 };
pub(crate) const SCENARIO_SPAWN: Pos = Pos { y: 6, x: 0 };

pub(crate) fn scenario_bounds() -> ArenaBounds {
    ArenaBounds::new(Pos { y: 2, x: 1 }, Pos { y: 10, x: 12 })
}

pub(crate) fn scenario_layout() -> ArenaLayout {
    ArenaLayout::open(scenario_bounds(), SCENARIO_GOAL, SCENARIO_REGEN)
}

pub(crate) fn scenario_pit() -> Pit {
    Pit::from_layout(scenario_layout())
}

/// Hands back a fixed layout stamped with the requested level.
#[derive(Debug)]
pub(crate) struct FixedRegenerator {
    pub layout: ArenaLayout,
    pub requested: Vec<u32>,
}

impl ArenaRegenerator for FixedRegenerator {
    fn regenerate_for_level(&mut self, level: u32) -> ArenaLayout {
        self.requested.push(level);
        self.layout.clone().with_level(level)
    }
}

pub(crate) struct Rig {
    pub world: Pit,
    pub pathfinder: GridPathfinder,
    pub levels: FifoLevelQueue,
    pub regenerator: FixedRegenerator,
}

impl Rig {
    pub(crate) fn new(world: Pit) -> Self {
        Self {
            world,
            pathfinder: GridPathfinder,
            levels: FifoLevelQueue::new(),
            regenerator: FixedRegenerator { layout: scenario_layout(), requested: Vec::new() },
        }
    }

    pub(crate) fn services(&mut self) -> Services<'_> {
        Services {
            world: &mut self.world,
            pathfinder: &self.pathfinder,
            levels: &mut self.levels,
            regenerator: &mut self.regenerator,
        }
    }
}

/// Steps `action` until it reports done; returns the number of steps taken.
pub(crate) fn run_to_completion(
    action: &mut dyn Action,
    hero: &mut Hero,
    rig: &mut Rig,
    config: &ActorConfig,
    max_steps: usize,
) -> usize {
    let mut services = rig.services();
    for step in 1..=max_steps {
        let status = action.step(hero, &mut services, config).expect("action step");
        if status == StepStatus::Done {
            return step;
        }
    }
    panic!("{} did not finish within {max_steps} steps", action.name());
}
