//! Arena growth and obstacle density by level.

use crate::types::Pos;

pub const ARENA_ORIGIN: Pos = Pos { y: 2, x: 2 };
pub const REGENERATION_POINT: Pos = Pos { y: 0, x: 0 };
pub const STARTING_LEVEL: u32 = 1;

const BASE_INTERIOR_WIDTH: i32 = 6;
const BASE_INTERIOR_HEIGHT: i32 = 5;
const MAX_INTERIOR_WIDTH: i32 = 24;
const MAX_INTERIOR_HEIGHT: i32 = 14;

/// Percent of the interior filled with obstacles, by level slot.
const OBSTACLE_PERCENT_BY_LEVEL: [usize; 6] = [0, 4, 6, 8, 10, 12];

/// Interior `(width, height)` for `level`; grows two columns and one row per level.
pub fn interior_extent(level: u32) -> (i32, i32) {
    let slot = level_slot(level) as i32;
    (
        (BASE_INTERIOR_WIDTH + 2 * slot).min(MAX_INTERIOR_WIDTH),
        (BASE_INTERIOR_HEIGHT + slot).min(MAX_INTERIOR_HEIGHT),
    )
}

pub fn obstacle_target(level: u32, interior_area: usize) -> usize {
    let slot = level_slot(level).min(OBSTACLE_PERCENT_BY_LEVEL.len() - 1);
    interior_area * OBSTACLE_PERCENT_BY_LEVEL[slot] / 100
}

fn level_slot(level: u32) -> usize {
    level.saturating_sub(STARTING_LEVEL) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_grows_then_caps() {
        assert_eq!(interior_extent(1), (6, 5));
        assert_eq!(interior_extent(2), (8, 6));
        assert_eq!(interior_extent(100), (MAX_INTERIOR_WIDTH, MAX_INTERIOR_HEIGHT));
        assert_eq!(interior_extent(0), interior_extent(1));
    }

    #[test]
    fn obstacle_density_follows_the_level_table() {
        assert_eq!(obstacle_target(1, 100), 0);
        assert_eq!(obstacle_target(3, 100), 6);
        assert_eq!(obstacle_target(50, 200), 24);
    }
}
