//! Per-cycle progress flags carried by the hero.
//! This module exists so the ladder flags change only through ordered, named transitions.
//! It does not decide when a transition happens; the actions do.

use serde::{Deserialize, Serialize};

use crate::error::CycleError;
use crate::planner::Predicate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentCycleState {
    entered_arena: bool,
    explored_arena: bool,
    reached_goal_object: bool,
    activated_goal_object: bool,
    reached_exit_edge: bool,
    exited_arena: bool,
}

impl AgentCycleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a ladder predicate holds. Non-ladder facts are never held here.
    pub fn holds(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::InsideArena => self.entered_arena,
            Predicate::ExploredArena => self.explored_arena,
            Predicate::ReachedGoalObject => self.reached_goal_object,
            Predicate::ActivatedGoalObject => self.activated_goal_object,
            Predicate::ReachedExitEdge => self.reached_exit_edge,
            Predicate::OutsideArena => self.exited_arena,
            _ => false,
        }
    }

    pub fn mark_entered_arena(&mut self) {
        self.entered_arena = true;
    }

    pub fn mark_explored_arena(&mut self) -> Result<(), CycleError> {
        require(self.entered_arena, Predicate::ExploredArena, Predicate::InsideArena)?;
        self.explored_arena = true;
        Ok(())
    }

    pub fn mark_reached_goal_object(&mut self) -> Result<(), CycleError> {
        require(self.explored_arena, Predicate::ReachedGoalObject, Predicate::ExploredArena)?;
        self.reached_goal_object = true;
        Ok(())
    }

    pub fn mark_activated_goal_object(&mut self) -> Result<(), CycleError> {
        require(
            self.reached_goal_object,
            Predicate::ActivatedGoalObject,
            Predicate::ReachedGoalObject,
        )?;
        self.activated_goal_object = true;
        Ok(())
    }

    pub fn mark_reached_exit_edge(&mut self) -> Result<(), CycleError> {
        require(
            self.activated_goal_object,
            Predicate::ReachedExitEdge,
            Predicate::ActivatedGoalObject,
        )?;
        self.reached_exit_edge = true;
        Ok(())
    }

    pub fn mark_exited_arena(&mut self) -> Result<(), CycleError> {
        require(self.reached_exit_edge, Predicate::OutsideArena, Predicate::ReachedExitEdge)?;
        self.exited_arena = true;
        Ok(())
    }

    /// Clears every flag at once; the only way a flag ever goes back to false.
    pub fn reset_for_new_cycle(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn bits(&self) -> u8 {
        [
            self.entered_arena,
            self.explored_arena,
            self.reached_goal_object,
            self.activated_goal_object,
            self.reached_exit_edge,
            self.exited_arena,
        ]
        .into_iter()
        .enumerate()
        .fold(0, |bits, (i, set)| bits | (u8::from(set) << i))
    }
}

fn require(prerequisite: bool, flag: Predicate, requires: Predicate) -> Result<(), CycleError> {
    if prerequisite { Ok(()) } else { Err(CycleError { flag, requires }) }
}
