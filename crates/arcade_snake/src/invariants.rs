//! Body and food invariants checked after every completed step.

use super::SnakeEngine;
use arcade_core::Invariant;
use std::collections::HashSet;

/// Invariant: no cell appears twice in the body.
pub struct NoOverlapInvariant;

impl Invariant<SnakeEngine> for NoOverlapInvariant {
    fn holds(game: &SnakeEngine) -> bool {
        let mut seen = HashSet::with_capacity(game.body().len());
        game.body().iter().all(|cell| seen.insert(*cell))
    }

    fn description() -> &'static str {
        "Body cells are distinct"
    }
}

/// Invariant: every body cell lies on the grid.
pub struct InBoundsInvariant;

impl Invariant<SnakeEngine> for InBoundsInvariant {
    fn holds(game: &SnakeEngine) -> bool {
        let (width, height) = (*game.config().width(), *game.config().height());
        game.body().iter().all(|cell| cell.in_bounds(width, height))
    }

    fn description() -> &'static str {
        "Body stays inside the grid"
    }
}

/// Invariant: food sits on a free cell, and is missing only on a full grid.
pub struct FoodPlacementInvariant;

impl Invariant<SnakeEngine> for FoodPlacementInvariant {
    fn holds(game: &SnakeEngine) -> bool {
        match game.food() {
            Some(food) => !game.body().contains(&food),
            None => game.body().len() == game.config().cells(),
        }
    }

    fn description() -> &'static str {
        "Food is disjoint from the body"
    }
}

/// All snake invariants as a composable set.
pub type SnakeInvariants = (NoOverlapInvariant, InBoundsInvariant, FoodPlacementInvariant);
