//! The hero: position, per-cycle flags, and the two ways it can move.

use tracing::warn;

use crate::cycle::AgentCycleState;
use crate::planner::ActionName;
use crate::types::{Direction, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hero {
    pos: Pos,
    cycle: AgentCycleState,
    steps_taken: u64,
    teleports: u32,
}

impl Hero {
    pub fn new(pos: Pos) -> Self {
        Self { pos, cycle: AgentCycleState::new(), steps_taken: 0, teleports: 0 }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn cycle(&self) -> &AgentCycleState {
        &self.cycle
    }

    pub(crate) fn cycle_mut(&mut self) -> &mut AgentCycleState {
        &mut self.cycle
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Times the teleport escape hatch was used.
    pub fn teleport_count(&self) -> u32 {
        self.teleports
    }

    /// Moves one tile. Callers check passability first.
    pub(crate) fn start_moving(&mut self, direction: Direction) -> Pos {
        self.pos = self.pos.step(direction);
        self.steps_taken += 1;
        self.pos
    }

    /// Last-resort placement used when path computation keeps failing.
    pub(crate) fn teleport_to(&mut self, tile: Pos, on_behalf_of: ActionName) {
        warn!(
            action = %on_behalf_of,
            from = ?self.pos,
            to = ?tile,
            "teleporting hero after repeated path failures"
        );
        self.pos = tile;
        self.teleports += 1;
    }
}
