//! Grid-backed arena world used by the tools and the test suites.

use super::{ArenaLayout, ArenaWorld, Passability};
use crate::types::{ArenaBounds, Pos};

#[derive(Clone, Debug)]
pub struct Pit {
    width: usize,
    height: usize,
    bounds: ArenaBounds,
    level: u32,
    blocked: Vec<bool>,
    fog: Vec<bool>,
    fog_remaining: usize,
    goal_object: Pos,
    goal_object_activated: bool,
    regeneration_point: Pos,
}

impl Pit {
    pub fn from_layout(layout: ArenaLayout) -> Self {
        let mut pit = Self {
            width: 0,
            height: 0,
            bounds: layout.bounds,
            level: layout.level,
            blocked: Vec::new(),
            fog: Vec::new(),
            fog_remaining: 0,
            goal_object: layout.goal_object,
            goal_object_activated: false,
            regeneration_point: layout.regeneration_point,
        };
        pit.install_layout(layout);
        pit
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_grid(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Adds or removes an obstacle at runtime, e.g. a transient blockage.
    pub fn set_obstacle(&mut self, pos: Pos, blocked: bool) {
        if !self.in_grid(pos) {
            return;
        }
        let idx = self.index(pos);
        self.blocked[idx] = blocked;
    }

    pub fn is_obstacle(&self, pos: Pos) -> bool {
        self.in_grid(pos) && self.blocked[self.index(pos)]
    }

    pub fn fogged_tile_count(&self) -> usize {
        self.fog_remaining
    }

    pub fn fogged_tiles(&self) -> Vec<Pos> {
        self.bounds.interior_tiles().filter(|pos| self.has_fog(*pos)).collect()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

impl Passability for Pit {
    fn is_passable(&self, tile: Pos) -> bool {
        self.in_grid(tile) && !self.blocked[self.index(tile)] && tile != self.goal_object
    }
}

impl ArenaWorld for Pit {
    fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn has_fog(&self, tile: Pos) -> bool {
        self.bounds.interior_contains(tile) && self.in_grid(tile) && self.fog[self.index(tile)]
    }

    fn clear_fog_around(&mut self, center: Pos, radius: i32) -> usize {
        let mut cleared = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let pos = Pos { y: center.y + dy, x: center.x + dx };
                if !self.has_fog(pos) {
                    continue;
                }
                let idx = self.index(pos);
                self.fog[idx] = false;
                cleared += 1;
            }
        }
        self.fog_remaining -= cleared;
        cleared
    }

    fn is_fully_explored(&self) -> bool {
        self.fog_remaining == 0
    }

    fn goal_object(&self) -> Pos {
        self.goal_object
    }

    fn is_goal_object_activated(&self) -> bool {
        self.goal_object_activated
    }

    fn activate_goal_object(&mut self) {
        self.goal_object_activated = true;
    }

    fn regeneration_point(&self) -> Pos {
        self.regeneration_point
    }

    fn install_layout(&mut self, layout: ArenaLayout) {
        self.width = layout.grid_width;
        self.height = layout.grid_height;
        self.bounds = layout.bounds;
        self.level = layout.level;
        self.goal_object = layout.goal_object;
        self.goal_object_activated = false;
        self.regeneration_point = layout.regeneration_point;

        self.blocked = vec![false; self.width * self.height];
        for obstacle in layout.obstacles {
            self.set_obstacle(obstacle, true);
        }

        self.fog = vec![false; self.width * self.height];
        self.fog_remaining = 0;
        for pos in self.bounds.interior_tiles() {
            if self.in_grid(pos) {
                let idx = self.index(pos);
                self.fog[idx] = true;
                self.fog_remaining += 1;
            }
        }
    }
}
