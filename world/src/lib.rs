#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative match state management for Tank Duel.
//!
//! The world owns the canvas, both tanks, and the mirror set. Systems mutate
//! it exclusively through [`apply`] and read it through [`query`] views, so
//! every state change flows through one observable seam.

pub mod canvas;

use self::canvas::Canvas;
use tank_duel_core::{
    Command, Direction, Event, FrameSnapshot, GridDimensions, GridPos, Mirror, TankSeed,
};

/// Represents the authoritative Tank Duel match state.
#[derive(Debug)]
pub struct World {
    dimensions: GridDimensions,
    canvas: Canvas,
    player: Tank,
    enemy: Tank,
    mirrors: Vec<Mirror>,
}

impl World {
    /// Creates a world from validated setup parts.
    ///
    /// The bootstrap system is the only caller and guarantees the setup
    /// invariants: an interior exists, both tanks sit strictly inside it on
    /// distinct cells, and every mirror occupies a free interior cell.
    #[must_use]
    pub fn new(
        dimensions: GridDimensions,
        player: TankSeed,
        enemy: TankSeed,
        mirrors: Vec<Mirror>,
    ) -> Self {
        Self {
            dimensions,
            canvas: Canvas::new(dimensions),
            player: Tank::from_seed(player),
            enemy: Tank::from_seed(enemy),
            mirrors,
        }
    }

    fn mirror_at(&self, pos: GridPos) -> Option<Mirror> {
        self.mirrors
            .iter()
            .copied()
            .find(|mirror| mirror.position() == pos)
    }

    fn can_enter(&self, cell: GridPos) -> bool {
        self.dimensions.interior_contains(cell)
            && cell != self.enemy.position
            && self.mirror_at(cell).is_none()
    }
}

#[derive(Clone, Copy, Debug)]
struct Tank {
    position: GridPos,
    facing: Direction,
}

impl Tank {
    fn from_seed(seed: TankSeed) -> Self {
        Self {
            position: seed.position(),
            facing: seed.facing(),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Face { heading } => {
            world.player.facing = heading;
            out_events.push(Event::TankRotated { heading });
        }
        Command::Advance { heading } => {
            let from = world.player.position;
            match from.step(heading) {
                Some(to) if world.can_enter(to) => {
                    world.player.position = to;
                    out_events.push(Event::TankMoved { from, to });
                }
                Some(to) => out_events.push(Event::MoveRejected { attempted: to }),
                None => out_events.push(Event::MoveRejected { attempted: from }),
            }
        }
    }
}

/// Transient marker composed onto a single frame: a travelling projectile or
/// an impact flash. Never stored in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    position: GridPos,
    marker: char,
}

impl Overlay {
    /// Creates an overlay placing `marker` at `position`.
    #[must_use]
    pub const fn new(position: GridPos, marker: char) -> Self {
        Self { position, marker }
    }
}

/// Re-renders the canvas from current state and captures a frame.
///
/// Border first, then enemy, mirrors, player, and finally the overlay, so a
/// projectile or impact flash is always drawn on top.
pub fn compose_frame(world: &mut World, overlay: Option<Overlay>) -> FrameSnapshot {
    world.canvas.reset_border();
    world
        .canvas
        .place_glyph(world.enemy.position, world.enemy.facing.tank_glyph());
    for mirror in &world.mirrors {
        world
            .canvas
            .place_glyph(mirror.position(), mirror.orientation().glyph());
    }
    world
        .canvas
        .place_glyph(world.player.position, world.player.facing.tank_glyph());
    if let Some(overlay) = overlay {
        world.canvas.place_glyph(overlay.position, overlay.marker);
    }
    world.canvas.snapshot()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use tank_duel_core::{Direction, GridDimensions, GridPos, Mirror, MirrorOrientation};

    /// Immutable representation of a single tank's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TankSnapshot {
        /// Cell the tank occupies.
        pub position: GridPos,
        /// Heading the tank faces.
        pub facing: Direction,
    }

    /// What a single cell holds, seen through the simulation's eyes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum CellContent {
        /// Wall ring cell, or any position outside the arena.
        Wall,
        /// Free interior cell.
        Empty,
        /// Interior cell occupied by a mirror.
        Mirror(MirrorOrientation),
        /// Interior cell occupied by the player tank.
        Player,
        /// Interior cell occupied by the enemy tank.
        Enemy,
    }

    /// Extent of the arena, wall ring included.
    #[must_use]
    pub fn dimensions(world: &World) -> GridDimensions {
        world.dimensions
    }

    /// Captures the player tank's current state.
    #[must_use]
    pub fn player(world: &World) -> TankSnapshot {
        TankSnapshot {
            position: world.player.position,
            facing: world.player.facing,
        }
    }

    /// Captures the enemy tank's current state.
    #[must_use]
    pub fn enemy(world: &World) -> TankSnapshot {
        TankSnapshot {
            position: world.enemy.position,
            facing: world.enemy.facing,
        }
    }

    /// Mirrors in scenario order.
    #[must_use]
    pub fn mirrors(world: &World) -> &[Mirror] {
        &world.mirrors
    }

    /// Classifies the provided cell.
    #[must_use]
    pub fn cell_content(world: &World, pos: GridPos) -> CellContent {
        if world.dimensions.is_wall(pos) {
            CellContent::Wall
        } else if pos == world.player.position {
            CellContent::Player
        } else if pos == world.enemy.position {
            CellContent::Enemy
        } else if let Some(mirror) = world.mirror_at(pos) {
            CellContent::Mirror(mirror.orientation())
        } else {
            CellContent::Empty
        }
    }

    /// Reports whether the cell blocks a firing lane.
    ///
    /// Anything other than a free interior cell obstructs: mirrors, walls,
    /// and defensively the tanks themselves.
    #[must_use]
    pub fn is_cell_obstructed(world: &World, pos: GridPos) -> bool {
        cell_content(world, pos) != CellContent::Empty
    }
}
