#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that validates a scenario and builds the world.
//!
//! Every fatal setup failure is caught here, before the turn engine ever
//! starts. Mirrors that would sit on a tank are the one recoverable case:
//! they are dropped with an event and ingestion continues.

use std::{error::Error, fmt};

use tank_duel_core::{Event, GridPos, MatchSetup, Mirror};
use tank_duel_system_line_of_sight::LineOfSight;
use tank_duel_world::{query, World};

/// Produces a validated world ready for the first turn.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Validates the scenario and constructs the authoritative world.
    ///
    /// Checks run in scenario order: arena extent, tank bounds, mirror
    /// placement, tank overlap, and finally the opening-shot rule — mirrors
    /// are ingested first so a mirror may legally block what would otherwise
    /// be an instant loss.
    pub fn launch(
        &self,
        setup: &MatchSetup,
        out_events: &mut Vec<Event>,
    ) -> Result<World, SetupError> {
        let dimensions = setup.dimensions;
        if !dimensions.has_interior() {
            return Err(SetupError::GridTooSmall {
                rows: dimensions.rows(),
                cols: dimensions.cols(),
            });
        }

        if !dimensions.interior_contains(setup.player.position()) {
            return Err(SetupError::PlayerOutOfBounds {
                position: setup.player.position(),
            });
        }
        if !dimensions.interior_contains(setup.enemy.position()) {
            return Err(SetupError::EnemyOutOfBounds {
                position: setup.enemy.position(),
            });
        }

        let mut mirrors: Vec<Mirror> = Vec::with_capacity(setup.mirrors.len());
        for mirror in &setup.mirrors {
            if !dimensions.interior_contains(mirror.position()) {
                return Err(SetupError::MirrorOutOfBounds {
                    position: mirror.position(),
                });
            }
            if mirror.position() == setup.player.position()
                || mirror.position() == setup.enemy.position()
            {
                out_events.push(Event::MirrorRejected {
                    position: mirror.position(),
                });
                continue;
            }
            mirrors.push(*mirror);
        }

        if setup.player.position() == setup.enemy.position() {
            return Err(SetupError::TanksOverlap {
                position: setup.player.position(),
            });
        }

        let world = World::new(dimensions, setup.player, setup.enemy, mirrors);

        let enemy = query::enemy(&world);
        let player = query::player(&world);
        let opening_shot = LineOfSight
            .evaluate(enemy.position, enemy.facing, player.position, |cell| {
                query::is_cell_obstructed(&world, cell)
            });
        if opening_shot.is_some() {
            return Err(SetupError::OpeningShot);
        }

        Ok(world)
    }
}

/// Fatal scenario problems that prevent a match from starting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupError {
    /// The arena is too small to hold an interior ring.
    GridTooSmall {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
    },
    /// The player tank starts outside the interior.
    PlayerOutOfBounds {
        /// Cell the scenario placed the player on.
        position: GridPos,
    },
    /// The enemy tank starts outside the interior.
    EnemyOutOfBounds {
        /// Cell the scenario placed the enemy on.
        position: GridPos,
    },
    /// A mirror sits outside the interior.
    MirrorOutOfBounds {
        /// Cell the scenario placed the mirror on.
        position: GridPos,
    },
    /// Player and enemy share a start cell.
    TanksOverlap {
        /// The shared cell.
        position: GridPos,
    },
    /// The enemy's initial facing already has an open shot at the player.
    OpeningShot,
}

impl fmt::Display for SetupError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { rows, cols } => write!(
                formatter,
                "arena of {rows}x{cols} cells has no interior; both extents must be at least 3",
            ),
            Self::PlayerOutOfBounds { position } => write!(
                formatter,
                "player out of bounds at row {}, column {}",
                position.row(),
                position.col(),
            ),
            Self::EnemyOutOfBounds { position } => write!(
                formatter,
                "enemy out of bounds at row {}, column {}",
                position.row(),
                position.col(),
            ),
            Self::MirrorOutOfBounds { position } => write!(
                formatter,
                "mirror out of bounds at row {}, column {}",
                position.row(),
                position.col(),
            ),
            Self::TanksOverlap { position } => write!(
                formatter,
                "player and enemy cannot start on the same cell (row {}, column {})",
                position.row(),
                position.col(),
            ),
            Self::OpeningShot => {
                write!(formatter, "cannot place tanks in an instant-loss position")
            }
        }
    }
}

impl Error for SetupError {}
