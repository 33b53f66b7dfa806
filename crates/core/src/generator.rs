//! Seeded arena sizing and obstacle placement, split into coherent submodules.

pub mod progression;

mod seed;

use std::collections::{BTreeSet, VecDeque};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::pathfinding::{manhattan, neighbors};
use crate::types::{ArenaBounds, Pos};
use crate::world::{ArenaLayout, ArenaRegenerator};

use progression::{ARENA_ORIGIN, REGENERATION_POINT, interior_extent, obstacle_target};
use seed::derive_level_seed;

/// Reference regeneration service: same run seed and level, same layout.
#[derive(Clone, Debug)]
pub struct PitGenerator {
    run_seed: u64,
}

impl PitGenerator {
    pub fn new(run_seed: u64) -> Self {
        Self { run_seed }
    }

    pub fn generate(&self, level: u32) -> ArenaLayout {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(self.run_seed, level));

        let (width, height) = interior_extent(level);
        let bounds = ArenaBounds::new(
            ARENA_ORIGIN,
            Pos { y: ARENA_ORIGIN.y + height + 1, x: ARENA_ORIGIN.x + width + 1 },
        );
        let interior: Vec<Pos> = bounds.interior_tiles().collect();
        let goal_object = interior[pick(&mut rng, interior.len())];
        let layout = ArenaLayout::open(bounds, goal_object, REGENERATION_POINT).with_level(level);

        let target = obstacle_target(level, interior.len());
        let mut obstacles = BTreeSet::new();
        for _ in 0..target * 8 {
            if obstacles.len() >= target {
                break;
            }
            let tile = interior[pick(&mut rng, interior.len())];
            // The goal object keeps all four sides open.
            if manhattan(tile, goal_object) <= 1 || !obstacles.insert(tile) {
                continue;
            }
            if !stays_connected(&layout, &obstacles) {
                obstacles.remove(&tile);
            }
        }

        layout.with_obstacles(obstacles)
    }
}

impl ArenaRegenerator for PitGenerator {
    fn regenerate_for_level(&mut self, level: u32) -> ArenaLayout {
        self.generate(level)
    }
}

fn pick(rng: &mut ChaCha8Rng, len: usize) -> usize {
    (rng.next_u64() % len as u64) as usize
}

/// Whether every open grid tile is still reachable from the regeneration point.
fn stays_connected(layout: &ArenaLayout, obstacles: &BTreeSet<Pos>) -> bool {
    let open = |pos: Pos| {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < layout.grid_width
            && (pos.y as usize) < layout.grid_height
            && pos != layout.goal_object
            && !obstacles.contains(&pos)
    };
    let open_total = layout.grid_width * layout.grid_height - obstacles.len() - 1;

    let mut seen = BTreeSet::from([layout.regeneration_point]);
    let mut queue = VecDeque::from([layout.regeneration_point]);
    while let Some(pos) = queue.pop_front() {
        for next in neighbors(pos) {
            if open(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == open_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ArenaWorld, Passability, Pit};

    #[test]
    fn same_seed_and_level_reproduce_the_layout() {
        let generator = PitGenerator::new(42);
        assert_eq!(generator.generate(5), PitGenerator::new(42).generate(5));
        assert_ne!(generator.generate(5), PitGenerator::new(43).generate(5));
    }

    #[test]
    fn goal_object_sits_in_the_interior_with_open_sides() {
        for seed in 0..20 {
            let layout = PitGenerator::new(seed).generate(4);
            assert!(layout.bounds.interior_contains(layout.goal_object));
            let pit = Pit::from_layout(layout.clone());
            for side in neighbors(layout.goal_object) {
                assert!(pit.is_passable(side), "seed {seed}: side {side:?} blocked");
            }
        }
    }

    #[test]
    fn obstacles_never_disconnect_the_grid() {
        for level in 1..=8 {
            let layout = PitGenerator::new(7).generate(level);
            assert!(stays_connected(&layout, &layout.obstacles.iter().copied().collect()));
            assert!(!layout.bounds.contains(layout.regeneration_point));
        }
    }

    #[test]
    fn first_level_is_an_open_arena() {
        let layout = PitGenerator::new(1).generate(1);
        assert!(layout.obstacles.is_empty());
        assert_eq!(layout.level, 1);
        assert_eq!(Pit::from_layout(layout).level(), 1);
    }
}
