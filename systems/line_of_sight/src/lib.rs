#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure facing evaluator that decides whether the enemy can open fire.
//!
//! The evaluator never touches world state directly; obstruction is supplied
//! as a closure so callers decide what blocks a lane.

use tank_duel_core::{Direction, FiringSolution, GridPos};

/// Pure system that evaluates the enemy's firing lane toward the player.
#[derive(Debug, Default)]
pub struct LineOfSight;

impl LineOfSight {
    /// Evaluates whether the enemy's current facing offers an open shot.
    ///
    /// Geometry must match the facing axis: the player has to sit on the
    /// enemy's heading side of a shared row or column. Every cell strictly
    /// between the tanks is then checked against `is_cell_obstructed`; any
    /// obstruction closes the lane. An open lane yields the firing solution:
    /// the cell adjacent to the enemy on the player's side, travelling along
    /// the enemy's facing.
    #[must_use]
    pub fn evaluate<F>(
        &self,
        enemy_position: GridPos,
        enemy_facing: Direction,
        player_position: GridPos,
        is_cell_obstructed: F,
    ) -> Option<FiringSolution>
    where
        F: Fn(GridPos) -> bool,
    {
        let lane = firing_lane(enemy_position, enemy_facing, player_position)?;
        if lane.between.iter().any(|cell| is_cell_obstructed(*cell)) {
            return None;
        }

        Some(FiringSolution {
            start: lane.start,
            heading: enemy_facing,
        })
    }
}

struct FiringLane {
    start: GridPos,
    between: Vec<GridPos>,
}

fn firing_lane(enemy: GridPos, facing: Direction, player: GridPos) -> Option<FiringLane> {
    match facing {
        Direction::Up => {
            if enemy.col() != player.col() || enemy.row() <= player.row() {
                return None;
            }
            Some(FiringLane {
                start: GridPos::new(enemy.row() - 1, enemy.col()),
                between: (player.row() + 1..enemy.row())
                    .map(|row| GridPos::new(row, enemy.col()))
                    .collect(),
            })
        }
        Direction::Down => {
            if enemy.col() != player.col() || enemy.row() >= player.row() {
                return None;
            }
            Some(FiringLane {
                start: GridPos::new(enemy.row() + 1, enemy.col()),
                between: (enemy.row() + 1..player.row())
                    .map(|row| GridPos::new(row, enemy.col()))
                    .collect(),
            })
        }
        Direction::Left => {
            if enemy.row() != player.row() || enemy.col() <= player.col() {
                return None;
            }
            Some(FiringLane {
                start: GridPos::new(enemy.row(), enemy.col() - 1),
                between: (player.col() + 1..enemy.col())
                    .map(|col| GridPos::new(enemy.row(), col))
                    .collect(),
            })
        }
        Direction::Right => {
            if enemy.row() != player.row() || enemy.col() >= player.col() {
                return None;
            }
            Some(FiringLane {
                start: GridPos::new(enemy.row(), enemy.col() + 1),
                between: (enemy.col() + 1..player.col())
                    .map(|col| GridPos::new(enemy.row(), col))
                    .collect(),
            })
        }
    }
}
