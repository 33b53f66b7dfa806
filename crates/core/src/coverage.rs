//! Exploration coverage bookkeeping: which interior tiles still carry fog, which are
//! temporarily excluded, and which columns have been deliberately reached.
//! This module exists so the sweep order and the verification audit are testable without
//! moving a hero.
//! It does not compute paths or move anything; the exploration action drives it.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::types::{ArenaBounds, Pos};
use crate::world::{ArenaWorld, Passability};

#[derive(Clone, Debug, Default)]
pub struct CoverageTracker {
    bounds: Option<ArenaBounds>,
    unvisited: BTreeSet<Pos>,
    visited: BTreeSet<Pos>,
    denylist: BTreeSet<Pos>,
    collisions: BTreeSet<Pos>,
    arrived_columns: BTreeSet<i32>,
    unreachable_columns: BTreeSet<i32>,
    verify_denylist: BTreeSet<Pos>,
}

impl CoverageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every set from the world's current fog.
    pub fn populate(&mut self, world: &dyn ArenaWorld) {
        *self = Self::default();
        let bounds = world.bounds();
        self.bounds = Some(bounds);
        for tile in bounds.interior_tiles() {
            if world.has_fog(tile) {
                self.unvisited.insert(tile);
            } else {
                self.visited.insert(tile);
            }
        }
        debug!(unvisited = self.unvisited.len(), "coverage populated");
    }

    pub fn is_populated(&self) -> bool {
        self.bounds.is_some()
    }

    /// Moves tiles whose fog has cleared since the last call into the visited set.
    /// Returns how many moved.
    pub fn refresh(&mut self, world: &dyn ArenaWorld) -> usize {
        let cleared: Vec<Pos> =
            self.unvisited.iter().copied().filter(|tile| !world.has_fog(*tile)).collect();
        for tile in &cleared {
            self.unvisited.remove(tile);
            self.denylist.remove(tile);
            self.collisions.remove(tile);
            self.visited.insert(*tile);
        }
        cleared.len()
    }

    /// Leftmost column first, then the row closest to the vertical centre, upper row on ties.
    pub fn next_sweep_candidate(&self) -> Option<Pos> {
        let bounds = self.bounds?;
        self.unvisited
            .iter()
            .copied()
            .filter(|tile| !self.denylist.contains(tile) && !self.collisions.contains(tile))
            .min_by_key(|tile| (tile.x, bounds.doubled_distance_from_center_row(tile.y), tile.y))
    }

    pub fn denylist(&mut self, tile: Pos) {
        if self.unvisited.contains(&tile) {
            debug!(?tile, "denylisting exploration target");
            self.denylist.insert(tile);
        }
    }

    /// Empties the denylist; returns how many tiles were released.
    pub fn clear_denylist(&mut self) -> usize {
        let released = self.denylist.len();
        self.denylist.clear();
        released
    }

    pub fn has_denylisted(&self) -> bool {
        !self.denylist.is_empty()
    }

    /// Foggy tile the hero cannot clear by standing on it; never a candidate again this cycle.
    pub fn mark_collision(&mut self, tile: Pos) {
        if self.unvisited.contains(&tile) {
            self.collisions.insert(tile);
        }
    }

    pub fn record_arrival(&mut self, tile: Pos) {
        if let Some(bounds) = self.bounds
            && bounds.interior_contains(tile)
        {
            self.arrived_columns.insert(tile.x);
            if self.unvisited.remove(&tile) {
                self.denylist.remove(&tile);
                self.visited.insert(tile);
            }
        }
    }

    pub fn sweep_exhausted(&self) -> bool {
        self.next_sweep_candidate().is_none() && self.denylist.is_empty()
    }

    /// Passable tile in the first column with no deliberate arrival, nearest the centre row.
    ///
    /// Columns whose every passable tile has failed are marked unreachable and skipped.
    pub fn next_verify_target(&mut self, grid: &dyn Passability) -> Option<Pos> {
        let bounds = self.bounds?;
        for x in bounds.interior_columns() {
            if self.column_settled(x) {
                continue;
            }
            let target = bounds
                .interior_rows()
                .map(|y| Pos { y, x })
                .filter(|tile| grid.is_passable(*tile) && !self.verify_denylist.contains(tile))
                .min_by_key(|tile| (bounds.doubled_distance_from_center_row(tile.y), tile.y));
            match target {
                Some(tile) => return Some(tile),
                None => {
                    warn!(column = x, "interior column has no reachable tile, skipping");
                    self.unreachable_columns.insert(x);
                }
            }
        }
        None
    }

    pub fn verify_failed(&mut self, tile: Pos) {
        self.verify_denylist.insert(tile);
    }

    pub fn column_settled(&self, x: i32) -> bool {
        self.arrived_columns.contains(&x) || self.unreachable_columns.contains(&x)
    }

    pub fn verification_complete(&self) -> bool {
        self.bounds.is_some_and(|bounds| bounds.interior_columns().all(|x| self.column_settled(x)))
    }

    pub fn is_complete(&self) -> bool {
        self.sweep_exhausted() && self.verification_complete()
    }

    pub fn unvisited_count(&self) -> usize {
        self.unvisited.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_unvisited(&self, tile: Pos) -> bool {
        self.unvisited.contains(&tile)
    }

    pub fn is_denylisted(&self, tile: Pos) -> bool {
        self.denylist.contains(&tile)
    }

    pub fn unreachable_columns(&self) -> impl Iterator<Item = i32> + '_ {
        self.unreachable_columns.iter().copied()
    }
}
