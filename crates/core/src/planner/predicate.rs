use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hero::Hero;
use crate::world::ArenaWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Predicate {
    InsideArena,
    ExploredArena,
    ReachedGoalObject,
    ActivatedGoalObject,
    ReachedExitEdge,
    OutsideArena,
    ArenaInitialized,
    AgentInitialized,
    WithinBounds,
    GoalObjectFound,
    FogCleared,
}

impl Predicate {
    pub fn as_str(self) -> &'static str {
        match self {
            Predicate::InsideArena => "InsideArena",
            Predicate::ExploredArena => "ExploredArena",
            Predicate::ReachedGoalObject => "ReachedGoalObject",
            Predicate::ActivatedGoalObject => "ActivatedGoalObject",
            Predicate::ReachedExitEdge => "ReachedExitEdge",
            Predicate::OutsideArena => "OutsideArena",
            Predicate::ArenaInitialized => "ArenaInitialized",
            Predicate::AgentInitialized => "AgentInitialized",
            Predicate::WithinBounds => "WithinBounds",
            Predicate::GoalObjectFound => "GoalObjectFound",
            Predicate::FogCleared => "FogCleared",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts that hold right now. Absence means false; there is no explicit false entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredicateSnapshot {
    facts: BTreeSet<Predicate>,
}

impl PredicateSnapshot {
    pub fn holds(&self, predicate: Predicate) -> bool {
        self.facts.contains(&predicate)
    }

    pub fn iter(&self) -> impl Iterator<Item = Predicate> + '_ {
        self.facts.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    fn assert_if(&mut self, predicate: Predicate, holds: bool) {
        if holds {
            self.facts.insert(predicate);
        }
    }
}

impl FromIterator<Predicate> for PredicateSnapshot {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self { facts: iter.into_iter().collect() }
    }
}

/// Rebuilds the snapshot from the hero's flags and constant-time world queries.
pub fn build_snapshot(hero: &Hero, world: &dyn ArenaWorld) -> PredicateSnapshot {
    let cycle = hero.cycle();
    let bounds = world.bounds();
    let goal_object = world.goal_object();

    let mut snapshot = PredicateSnapshot::default();
    for rung in super::GOAL_LADDER {
        snapshot.assert_if(rung.goal, cycle.holds(rung.goal));
    }
    snapshot.assert_if(
        Predicate::ArenaInitialized,
        bounds.interior_area() > 0 && bounds.interior_contains(goal_object),
    );
    snapshot.assert_if(Predicate::AgentInitialized, world.is_passable(hero.pos()));
    snapshot.assert_if(Predicate::WithinBounds, bounds.contains(hero.pos()));
    snapshot.assert_if(Predicate::GoalObjectFound, !world.has_fog(goal_object));
    snapshot.assert_if(Predicate::FogCleared, world.is_fully_explored());
    snapshot
}
