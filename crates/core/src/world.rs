//! Collaborator contracts consumed by the behavior core, plus the in-process implementations
//! the tools and tests run against.
//! This module exists so every dependency of an action is visible in a type signature.
//! It does not own planning, movement policy or exploration bookkeeping.

use serde::{Deserialize, Serialize};

use crate::types::{ArenaBounds, Pos};

mod levels;
mod pit;

pub use levels::FifoLevelQueue;
pub use pit::Pit;

/// Passability oracle the pathfinder searches over.
pub trait Passability {
    fn is_passable(&self, tile: Pos) -> bool;
}

/// Query and command surface over the arena's live state.
pub trait ArenaWorld: Passability {
    fn bounds(&self) -> ArenaBounds;

    /// Difficulty level the current layout was generated for.
    fn level(&self) -> u32;

    fn has_fog(&self, tile: Pos) -> bool;

    /// Clears fog on interior tiles within a square `radius` of `center`; returns how many
    /// tiles changed.
    fn clear_fog_around(&mut self, center: Pos, radius: i32) -> usize;

    /// Aggregate kept up to date by the world itself, so it is O(1) to ask.
    fn is_fully_explored(&self) -> bool;

    /// Interior tile of the goal object. At least one of its four neighbours must be
    /// passable, or approach and activation fail on every re-plan.
    fn goal_object(&self) -> Pos;

    fn is_goal_object_activated(&self) -> bool;

    fn activate_goal_object(&mut self);

    fn regeneration_point(&self) -> Pos;

    /// Replaces obstacles, goal object and fog with a freshly generated layout.
    fn install_layout(&mut self, layout: ArenaLayout);
}

/// Decouples deciding the next difficulty from applying it.
pub trait LevelQueue {
    fn queue_level(&mut self, level: u32);
    fn has_queued_level(&self) -> bool;
    fn dequeue_level(&mut self) -> Option<u32>;
}

/// Arena sizing and obstacle placement service.
pub trait ArenaRegenerator {
    fn regenerate_for_level(&mut self, level: u32) -> ArenaLayout;
}

/// Everything needed to (re)build an arena.
///
/// `goal_object` must keep at least one passable 4-neighbour; [`ArenaWorld::goal_object`]
/// relies on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub level: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub bounds: ArenaBounds,
    pub obstacles: Vec<Pos>,
    pub goal_object: Pos,
    pub regeneration_point: Pos,
}

/// Free tiles kept around the bounds when a layout sizes its own grid.
pub const GRID_MARGIN: i32 = 2;

impl ArenaLayout {
    /// Obstacle-free layout whose grid spans the bounds plus [`GRID_MARGIN`].
    pub fn open(bounds: ArenaBounds, goal_object: Pos, regeneration_point: Pos) -> Self {
        let grid_width = (bounds.max.x.max(regeneration_point.x) + 1 + GRID_MARGIN) as usize;
        let grid_height = (bounds.max.y.max(regeneration_point.y) + 1 + GRID_MARGIN) as usize;
        Self {
            level: 1,
            grid_width,
            grid_height,
            bounds,
            obstacles: Vec::new(),
            goal_object,
            regeneration_point,
        }
    }

    pub fn with_level(self, level: u32) -> Self {
        Self { level, ..self }
    }

    pub fn with_obstacles(self, obstacles: impl IntoIterator<Item = Pos>) -> Self {
        Self { obstacles: obstacles.into_iter().collect(), ..self }
    }
}
