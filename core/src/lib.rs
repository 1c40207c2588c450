#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tank Duel engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw input into
//! [`Action`] values, the turn system converts those into [`Command`] values
//! the world executes, and the world broadcasts [`Event`] values describing
//! what actually happened so adapters can narrate the match.

use serde::{Deserialize, Serialize};

/// Glyphs that compose a rendered frame.
pub mod glyph {
    /// Wall cell forming the outer ring of the arena.
    pub const WALL: char = '*';
    /// Interior cell with nothing in it.
    pub const EMPTY: char = ' ';
    /// Tank facing toward decreasing row indices.
    pub const FACE_UP: char = '^';
    /// Tank facing toward increasing row indices.
    pub const FACE_DOWN: char = 'v';
    /// Tank facing toward decreasing column indices.
    pub const FACE_LEFT: char = '<';
    /// Tank facing toward increasing column indices.
    pub const FACE_RIGHT: char = '>';
    /// Mirror angled like a forward slash.
    pub const MIRROR_FORWARD: char = '/';
    /// Mirror angled like a back slash.
    pub const MIRROR_BACK: char = '\\';
    /// Projectile travelling along the vertical axis.
    pub const BULLET_VERTICAL: char = '|';
    /// Projectile travelling along the horizontal axis.
    pub const BULLET_HORIZONTAL: char = '-';
    /// Impact flash shown on the cell where a shot connects.
    pub const IMPACT: char = 'X';
}

/// Keyboard characters the terminal adapter maps onto actions.
pub mod keys {
    /// Face or advance toward decreasing row indices.
    pub const UP: char = 'w';
    /// Face or advance toward increasing row indices.
    pub const DOWN: char = 's';
    /// Face or advance toward decreasing column indices.
    pub const LEFT: char = 'a';
    /// Face or advance toward increasing column indices.
    pub const RIGHT: char = 'd';
    /// Fire a projectile along the player's facing.
    pub const SHOOT: char = 'f';
    /// Persist the frame journal to the log file.
    pub const SAVE: char = 'l';
}

/// Cardinal headings available to tanks and projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Parses the single-character heading used in scenario files.
    #[must_use]
    pub const fn from_scenario_char(token: char) -> Option<Self> {
        match token {
            'u' => Some(Self::Up),
            'd' => Some(Self::Down),
            'l' => Some(Self::Left),
            'r' => Some(Self::Right),
            _ => None,
        }
    }

    /// Glyph drawn for a tank facing this heading.
    #[must_use]
    pub const fn tank_glyph(self) -> char {
        match self {
            Self::Up => glyph::FACE_UP,
            Self::Down => glyph::FACE_DOWN,
            Self::Left => glyph::FACE_LEFT,
            Self::Right => glyph::FACE_RIGHT,
        }
    }

    /// Glyph drawn for a projectile travelling along this heading.
    #[must_use]
    pub const fn projectile_glyph(self) -> char {
        match self {
            Self::Up | Self::Down => glyph::BULLET_VERTICAL,
            Self::Left | Self::Right => glyph::BULLET_HORIZONTAL,
        }
    }
}

/// Orientations available to the static mirrors that deflect projectiles.
///
/// Mirrors label cells; they are never a moving entity's heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MirrorOrientation {
    /// Mirror angled like `/`.
    ForwardSlash,
    /// Mirror angled like `\`.
    BackSlash,
}

impl MirrorOrientation {
    /// Parses the single-character orientation used in scenario files.
    #[must_use]
    pub const fn from_scenario_char(token: char) -> Option<Self> {
        match token {
            'f' => Some(Self::ForwardSlash),
            'b' => Some(Self::BackSlash),
            _ => None,
        }
    }

    /// Glyph drawn for a mirror with this orientation.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::ForwardSlash => glyph::MIRROR_FORWARD,
            Self::BackSlash => glyph::MIRROR_BACK,
        }
    }

    /// Heading a projectile leaves with after entering the mirror cell.
    ///
    /// The pairs are involutive: reflecting twice off the same orientation
    /// restores the incoming heading.
    #[must_use]
    pub const fn reflect(self, incoming: Direction) -> Direction {
        match self {
            Self::BackSlash => match incoming {
                Direction::Up => Direction::Left,
                Direction::Down => Direction::Right,
                Direction::Left => Direction::Up,
                Direction::Right => Direction::Down,
            },
            Self::ForwardSlash => match incoming {
                Direction::Up => Direction::Right,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Down,
                Direction::Right => Direction::Up,
            },
        }
    }
}

/// Location of a single arena cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    row: u32,
    col: u32,
}

impl GridPos {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }

    /// Cell one step along the provided heading, or `None` when the step
    /// would leave the coordinate space past row or column zero.
    #[must_use]
    pub const fn step(self, heading: Direction) -> Option<Self> {
        match heading {
            Direction::Up => match self.row.checked_sub(1) {
                Some(row) => Some(Self::new(row, self.col)),
                None => None,
            },
            Direction::Down => Some(Self::new(self.row + 1, self.col)),
            Direction::Left => match self.col.checked_sub(1) {
                Some(col) => Some(Self::new(self.row, col)),
                None => None,
            },
            Direction::Right => Some(Self::new(self.row, self.col + 1)),
        }
    }
}

/// Rectangular dimensions of the arena, wall ring included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    rows: u32,
    cols: u32,
}

impl GridDimensions {
    /// Smallest legal extent along either axis: one interior ring of cells.
    pub const MIN_EXTENT: u32 = 3;

    /// Creates a new dimensions descriptor.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of rows, wall ring included.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns, wall ring included.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Reports whether both extents admit at least one interior cell.
    #[must_use]
    pub const fn has_interior(&self) -> bool {
        self.rows >= Self::MIN_EXTENT && self.cols >= Self::MIN_EXTENT
    }

    /// Reports whether the cell lies anywhere inside the arena.
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.row() < self.rows && pos.col() < self.cols
    }

    /// Reports whether the cell lies strictly inside the wall ring.
    #[must_use]
    pub const fn interior_contains(&self, pos: GridPos) -> bool {
        pos.row() >= 1
            && pos.col() >= 1
            && pos.row() < self.rows.saturating_sub(1)
            && pos.col() < self.cols.saturating_sub(1)
    }

    /// Reports whether the cell lies on the wall ring or outside the arena.
    #[must_use]
    pub const fn is_wall(&self, pos: GridPos) -> bool {
        !self.interior_contains(pos)
    }
}

/// Static mirror occupying one interior cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mirror {
    position: GridPos,
    orientation: MirrorOrientation,
}

impl Mirror {
    /// Creates a mirror at the provided cell.
    #[must_use]
    pub const fn new(position: GridPos, orientation: MirrorOrientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Cell the mirror occupies.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.position
    }

    /// Orientation of the mirror line.
    #[must_use]
    pub const fn orientation(&self) -> MirrorOrientation {
        self.orientation
    }
}

/// Initial placement of one tank, read from a scenario file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TankSeed {
    position: GridPos,
    facing: Direction,
}

impl TankSeed {
    /// Creates a new tank seed.
    #[must_use]
    pub const fn new(position: GridPos, facing: Direction) -> Self {
        Self { position, facing }
    }

    /// Cell the tank starts on.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.position
    }

    /// Heading the tank starts with.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }
}

/// Complete parsed scenario: arena extent, both tanks, and the mirror set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSetup {
    /// Arena dimensions, wall ring included.
    pub dimensions: GridDimensions,
    /// Player tank placement.
    pub player: TankSeed,
    /// Enemy tank placement.
    pub enemy: TankSeed,
    /// Mirrors in scenario-file order.
    pub mirrors: Vec<Mirror>,
}

/// Player input after the terminal adapter has decoded one key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Face the provided heading, or advance one cell when already facing it.
    Steer(Direction),
    /// Fire a projectile along the player's current facing.
    Shoot,
    /// Persist the frame journal to the log file.
    SaveJournal,
    /// Any key with no assigned meaning.
    Unknown,
}

impl Action {
    /// Decodes a single key press into an action.
    #[must_use]
    pub const fn from_key(key: char) -> Self {
        match key {
            keys::UP => Self::Steer(Direction::Up),
            keys::DOWN => Self::Steer(Direction::Down),
            keys::LEFT => Self::Steer(Direction::Left),
            keys::RIGHT => Self::Steer(Direction::Right),
            keys::SHOOT => Self::Shoot,
            keys::SAVE => Self::SaveJournal,
            _ => Self::Unknown,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Rotates the player tank to the provided heading without moving it.
    Face {
        /// Heading the player tank should adopt.
        heading: Direction,
    },
    /// Advances the player tank one cell along the provided heading.
    Advance {
        /// Heading of the attempted step.
        heading: Direction,
    },
}

/// Events broadcast after processing commands or resolving turns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player tank now faces a new heading.
    TankRotated {
        /// Heading the player tank adopted.
        heading: Direction,
    },
    /// Confirms that the player tank moved between two cells.
    TankMoved {
        /// Cell the tank occupied before the step.
        from: GridPos,
        /// Cell the tank occupies after the step.
        to: GridPos,
    },
    /// Reports that an advance request was absorbed without effect.
    MoveRejected {
        /// Cell the tank attempted to enter.
        attempted: GridPos,
    },
    /// Reports that a scenario mirror was dropped during setup.
    MirrorRejected {
        /// Cell the rejected mirror would have occupied.
        position: GridPos,
    },
    /// Announces the terminal result of a projectile run.
    ShotResolved {
        /// How the projectile run ended.
        outcome: ShotOutcome,
    },
    /// Confirms that the journal was written to the log file.
    JournalSaved {
        /// Number of frames persisted.
        frames: usize,
    },
    /// Reports that the journal could not be written.
    JournalSaveFailed {
        /// Human-readable failure description.
        reason: String,
    },
    /// Reports that a save was requested while the journal was empty.
    NothingToSave,
    /// Reports that an unrecognized key was pressed.
    InvalidInput,
}

/// Terminal result of one projectile run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShotOutcome {
    /// The projectile struck the player tank.
    PlayerHit,
    /// The projectile struck the enemy tank.
    EnemyHit,
    /// The projectile vanished into the wall ring.
    Absorbed,
}

/// Terminal result of the whole match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// The player's shot struck the enemy tank.
    PlayerWin,
    /// A shot struck the player tank.
    PlayerLoss,
}

/// Opening shot computed by the line-of-sight evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiringSolution {
    /// First cell of the projectile run, adjacent to the shooter.
    pub start: GridPos,
    /// Heading the projectile travels along.
    pub heading: Direction,
}

/// Immutable copy of the rendered arena at one instant.
///
/// Ownership passes to the history journal once appended; presenters only
/// ever borrow a frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    rows: u32,
    cols: u32,
    cells: Vec<char>,
}

impl FrameSnapshot {
    /// Builds a frame from a dense row-major glyph buffer.
    ///
    /// Callers supply exactly `rows * cols` glyphs.
    #[must_use]
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<char>) -> Self {
        Self { rows, cols, cells }
    }

    /// Number of rows captured by the frame.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns captured by the frame.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Glyph at the provided cell, or `None` outside the frame.
    #[must_use]
    pub fn glyph_at(&self, pos: GridPos) -> Option<char> {
        if pos.row() >= self.rows || pos.col() >= self.cols {
            return None;
        }

        let row = usize::try_from(pos.row()).ok()?;
        let col = usize::try_from(pos.col()).ok()?;
        let width = usize::try_from(self.cols).ok()?;
        self.cells.get(row * width + col).copied()
    }

    /// Iterator over the frame's rows rendered as text lines.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let width = usize::try_from(self.cols).unwrap_or(0).max(1);
        self.cells.chunks(width).map(|row| row.iter().collect())
    }
}
