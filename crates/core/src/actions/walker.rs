//! Cached-path stepping shared by every moving action.

use std::collections::VecDeque;

use super::Services;
use crate::config::ActorConfig;
use crate::hero::Hero;
use crate::pathfinding::manhattan;
use crate::planner::ActionName;
use crate::types::{Direction, Pos};
use crate::world::{ArenaWorld, Passability};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WalkStatus {
    Arrived,
    Moving,
    NoPath { failures: u32 },
}

#[derive(Clone, Debug)]
pub(crate) struct PathWalker {
    target: Pos,
    path: VecDeque<Pos>,
    failures: u32,
}

impl PathWalker {
    pub(crate) fn new(target: Pos) -> Self {
        Self { target, path: VecDeque::new(), failures: 0 }
    }

    pub(crate) fn target(&self) -> Pos {
        self.target
    }

    /// One tile toward the target, recomputing the path when the cached next tile is no
    /// longer a legal step.
    pub(crate) fn advance(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
    ) -> WalkStatus {
        if hero.pos() == self.target {
            return WalkStatus::Arrived;
        }

        let grid: &dyn Passability = &*services.world;
        let next_is_legal = self.path.front().is_some_and(|next| {
            Direction::between(hero.pos(), *next).is_some()
                && services.pathfinder.is_passable(grid, *next)
        });
        if !next_is_legal {
            match services.pathfinder.calculate_path(grid, hero.pos(), self.target) {
                Some(path) if !path.is_empty() => {
                    self.path = path.into();
                    self.failures = 0;
                }
                _ => return self.fail(),
            }
        }

        let Some(next) = self.path.pop_front() else {
            return self.fail();
        };
        let Some(direction) = Direction::between(hero.pos(), next) else {
            return self.fail();
        };
        hero.start_moving(direction);
        reveal_around(hero, services.world, config);

        if hero.pos() == self.target { WalkStatus::Arrived } else { WalkStatus::Moving }
    }

    /// Like [`PathWalker::advance`], but places the hero on the target once the failure
    /// budget is spent. Returns whether the hero is now on the target.
    pub(crate) fn advance_or_teleport(
        &mut self,
        hero: &mut Hero,
        services: &mut Services<'_>,
        config: &ActorConfig,
        on_behalf_of: ActionName,
    ) -> bool {
        match self.advance(hero, services, config) {
            WalkStatus::Arrived => true,
            WalkStatus::Moving => false,
            WalkStatus::NoPath { failures } if failures >= config.max_path_failures => {
                hero.teleport_to(self.target, on_behalf_of);
                reveal_around(hero, services.world, config);
                self.failures = 0;
                true
            }
            WalkStatus::NoPath { .. } => false,
        }
    }

    fn fail(&mut self) -> WalkStatus {
        self.path.clear();
        self.failures += 1;
        WalkStatus::NoPath { failures: self.failures }
    }
}

/// Clears fog around the hero when it stands inside the arena.
pub(crate) fn reveal_around(hero: &Hero, world: &mut dyn ArenaWorld, config: &ActorConfig) {
    if world.bounds().contains(hero.pos()) {
        world.clear_fog_around(hero.pos(), config.fog_clear_radius);
    }
}

/// Orders tiles by Manhattan distance to `anchor`, ties by `(y, x)`.
pub(crate) fn sort_nearest(tiles: &mut [Pos], anchor: Pos) {
    tiles.sort_by_key(|tile| (manhattan(*tile, anchor), *tile));
}

/// First passable tile, in the given order, the hero can currently path to.
pub(crate) fn first_reachable(
    tiles: &[Pos],
    hero: &Hero,
    services: &Services<'_>,
) -> Option<Pos> {
    let grid: &dyn Passability = &*services.world;
    tiles.iter().copied().find(|tile| {
        services.pathfinder.is_passable(grid, *tile)
            && services.pathfinder.calculate_path(grid, hero.pos(), *tile).is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::neighbors;
    use crate::test_support::{Rig, scenario_pit};

    #[test]
    fn walks_one_tile_per_advance_and_clears_fog_inside() {
        let mut rig = Rig::new(scenario_pit());
        let config = ActorConfig::default();
        let mut hero = Hero::new(Pos { y: 6, x: 0 });
        let mut walker = PathWalker::new(Pos { y: 6, x: 3 });

        let mut services = rig.services();
        assert_eq!(walker.advance(&mut hero, &mut services, &config), WalkStatus::Moving);
        assert_eq!(hero.pos(), Pos { y: 6, x: 1 });
        assert!(!services.world.has_fog(Pos { y: 6, x: 3 }), "edge tile reveals the interior");
        assert_eq!(walker.advance(&mut hero, &mut services, &config), WalkStatus::Moving);
        assert_eq!(walker.advance(&mut hero, &mut services, &config), WalkStatus::Arrived);
        assert_eq!(hero.steps_taken(), 3);
    }

    #[test]
    fn repeated_failures_fall_back_to_teleport() {
        let mut pit = scenario_pit();
        let target = Pos { y: 4, x: 4 };
        for tile in neighbors(target) {
            pit.set_obstacle(tile, true);
        }
        let mut rig = Rig::new(pit);
        let config = ActorConfig { max_path_failures: 3, ..ActorConfig::default() };
        let mut hero = Hero::new(Pos { y: 0, x: 0 });
        let mut walker = PathWalker::new(target);

        let mut services = rig.services();
        for _ in 0..2 {
            assert!(!walker.advance_or_teleport(
                &mut hero,
                &mut services,
                &config,
                ActionName::ApproachGoalObject
            ));
        }
        assert!(walker.advance_or_teleport(
            &mut hero,
            &mut services,
            &config,
            ActionName::ApproachGoalObject
        ));
        assert_eq!(hero.pos(), target);
        assert_eq!(hero.teleport_count(), 1);
    }

    #[test]
    fn nearest_ordering_breaks_ties_by_row_then_column() {
        let mut tiles = vec![Pos { y: 2, x: 4 }, Pos { y: 1, x: 3 }, Pos { y: 0, x: 0 }];
        sort_nearest(&mut tiles, Pos { y: 1, x: 1 });
        assert_eq!(tiles, vec![Pos { y: 0, x: 0 }, Pos { y: 1, x: 3 }, Pos { y: 2, x: 4 }]);
    }
}
