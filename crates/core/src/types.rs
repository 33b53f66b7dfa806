//! Tile-space primitives shared by the world, the planner and the actions.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dy, dx) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`, if they are adjacent.
    pub fn between(from: Pos, to: Pos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|direction| from.step(*direction) == to)
    }
}

/// Inclusive rectangle covering the arena.
///
/// The border ring is the arena's inside edge; the tiles strictly inside the ring are the
/// explorable interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub min: Pos,
    pub max: Pos,
}

impl ArenaBounds {
    pub fn new(min: Pos, max: Pos) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y);
        Self { min, max }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    pub fn interior_contains(&self, pos: Pos) -> bool {
        pos.x > self.min.x && pos.x < self.max.x && pos.y > self.min.y && pos.y < self.max.y
    }

    pub fn is_edge(&self, pos: Pos) -> bool {
        self.contains(pos) && !self.interior_contains(pos)
    }

    pub fn interior_columns(&self) -> impl Iterator<Item = i32> + use<> {
        (self.min.x + 1)..self.max.x
    }

    pub fn interior_rows(&self) -> impl Iterator<Item = i32> + use<> {
        (self.min.y + 1)..self.max.y
    }

    /// Interior tiles in row-major order.
    pub fn interior_tiles(&self) -> impl Iterator<Item = Pos> + use<> {
        let columns = (self.min.x + 1)..self.max.x;
        self.interior_rows().flat_map(move |y| columns.clone().map(move |x| Pos { y, x }))
    }

    pub fn interior_area(&self) -> usize {
        let width = (self.max.x - self.min.x - 1).max(0) as usize;
        let height = (self.max.y - self.min.y - 1).max(0) as usize;
        width * height
    }

    /// Border-ring tiles in row-major order.
    pub fn edge_tiles(&self) -> Vec<Pos> {
        let mut tiles = Vec::new();
        for y in self.min.y..=self.max.y {
            for x in self.min.x..=self.max.x {
                let pos = Pos { y, x };
                if self.is_edge(pos) {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }

    /// Distance of `y` from the vertical centre, in doubled units so half rows stay exact.
    pub fn doubled_distance_from_center_row(&self, y: i32) -> u32 {
        (2 * y).abs_diff(self.min.y + self.max.y)
    }

    /// Closest tile inside the bounds to `pos`.
    pub fn clamp(&self, pos: Pos) -> Pos {
        Pos { y: pos.y.clamp(self.min.y, self.max.y), x: pos.x.clamp(self.min.x, self.max.x) }
    }
}
