//! Deterministic shortest-path service over a passability oracle.
//! This module exists so navigation is a stateless leaf the actions can share.
//! It does not own target selection or any retry policy.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::Pos;
use crate::world::Passability;

pub trait Pathfinder {
    /// Ordered tiles from `start` (exclusive) to `goal` (inclusive); empty when they coincide.
    fn calculate_path(&self, grid: &dyn Passability, start: Pos, goal: Pos) -> Option<Vec<Pos>>;

    fn is_passable(&self, grid: &dyn Passability, tile: Pos) -> bool {
        grid.is_passable(tile)
    }
}

/// A* over the 4-neighbourhood with Manhattan heuristic and `(f, h, y, x)` tie-breaking.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPathfinder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

impl Pathfinder for GridPathfinder {
    fn calculate_path(&self, grid: &dyn Passability, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
        if start == goal {
            return Some(Vec::new());
        }
        if !grid.is_passable(goal) {
            return None;
        }

        let mut open_set = BTreeSet::new();
        let mut open_entries: BTreeMap<Pos, OpenNode> = BTreeMap::new();
        let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
        let mut g_score: BTreeMap<Pos, u32> = BTreeMap::new();

        let start_h = manhattan(start, goal);
        let start_node = OpenNode { f: start_h, h: start_h, y: start.y, x: start.x };
        open_set.insert(start_node);
        open_entries.insert(start, start_node);
        g_score.insert(start, 0);

        while let Some(current_node) = open_set.pop_first() {
            let current = Pos { y: current_node.y, x: current_node.x };
            open_entries.remove(&current);

            if current == goal {
                return reconstruct_path(&came_from, start, goal);
            }

            let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
            if current_g == u32::MAX {
                continue;
            }

            for neighbor in neighbors(current) {
                if !grid.is_passable(neighbor) {
                    continue;
                }

                let tentative_g = current_g.saturating_add(1);
                let existing_g = g_score.get(&neighbor).copied().unwrap_or(u32::MAX);
                if tentative_g >= existing_g {
                    continue;
                }

                if let Some(existing_node) = open_entries.remove(&neighbor) {
                    open_set.remove(&existing_node);
                }

                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);

                let h = manhattan(neighbor, goal);
                let f = tentative_g.saturating_add(h);
                let node = OpenNode { f, h, y: neighbor.y, x: neighbor.x };
                open_set.insert(node);
                open_entries.insert(neighbor, node);
            }
        }

        None
    }
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        current = came_from.get(&current).copied()?;
        path.push(current);
    }

    path.reverse();
    path.remove(0);
    Some(path)
}

pub fn neighbors(pos: Pos) -> [Pos; 4] {
    [
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y, x: pos.x - 1 },
    ]
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}
