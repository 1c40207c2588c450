#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tank Duel adapters.
//!
//! The simulation crates never print, clear, or sleep. They hand every frame
//! to an injected [`FramePresenter`] along with a pacing hint, and adapters
//! decide how (and how fast) frames reach the player.

use std::time::Duration;

use anyhow::Result as AnyResult;
use tank_duel_core::FrameSnapshot;

/// Pause observed by paced presenters before drawing an animation frame.
pub const ANIMATION_TICK: Duration = Duration::from_millis(200);

/// Scheduling hint attached to every presented frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FramePacing {
    /// Draw immediately; the frame reacts to a player action.
    Immediate,
    /// Pause for one animation tick before drawing; the frame is one step of
    /// a projectile in flight.
    AnimationTick,
}

/// Capability to show rendered frames to the player.
///
/// Presenters only borrow frames; ownership stays with the caller so the
/// same frame can continue into the history journal.
pub trait FramePresenter {
    /// Shows one frame, honoring the provided pacing hint.
    fn present(&mut self, frame: &FrameSnapshot, pacing: FramePacing) -> AnyResult<()>;
}
