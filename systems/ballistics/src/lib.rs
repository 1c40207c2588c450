#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projectile trajectory simulator with wall absorption and mirror
//! reflection.
//!
//! A projectile advances one cell per animation tick. Every step re-renders
//! the arena through the injected presenter and records the frame in the
//! journal, so the world is left in a fully rendered state after each tick.

use anyhow::Result as AnyResult;
use tank_duel_core::{glyph, FiringSolution, GridPos, ShotOutcome};
use tank_duel_history::Journal;
use tank_duel_rendering::{FramePacing, FramePresenter};
use tank_duel_world::{compose_frame, query, query::CellContent, Overlay, World};

/// Simulator that runs one projectile from muzzle to terminal outcome.
#[derive(Debug, Default)]
pub struct Ballistics;

impl Ballistics {
    /// Animates a projectile along the firing solution until it resolves.
    ///
    /// Per visited cell, in order: a wall absorbs the shot; a tank takes the
    /// hit and flashes an impact marker; a mirror folds the heading and the
    /// run continues one cell along the new heading; an empty cell shows the
    /// travelling projectile. A start cell already on the wall ring absorbs
    /// the shot with zero travel, and that frame is not journalled because
    /// no projectile was ever visible.
    pub fn animate(
        &self,
        world: &mut World,
        shot: FiringSolution,
        presenter: &mut dyn FramePresenter,
        journal: &mut Journal,
    ) -> AnyResult<ShotOutcome> {
        let mut cursor = shot.start;
        let mut heading = shot.heading;
        let mut travelled = false;

        loop {
            match query::cell_content(world, cursor) {
                CellContent::Wall => {
                    return vanish(world, presenter, journal, travelled);
                }
                CellContent::Player => {
                    return strike(world, presenter, journal, cursor, ShotOutcome::PlayerHit);
                }
                CellContent::Enemy => {
                    return strike(world, presenter, journal, cursor, ShotOutcome::EnemyHit);
                }
                CellContent::Mirror(orientation) => {
                    heading = orientation.reflect(heading);
                    match cursor.step(heading) {
                        Some(next) => cursor = next,
                        None => return vanish(world, presenter, journal, travelled),
                    }
                }
                CellContent::Empty => {
                    let frame = compose_frame(
                        world,
                        Some(Overlay::new(cursor, heading.projectile_glyph())),
                    );
                    presenter.present(&frame, FramePacing::AnimationTick)?;
                    journal.append(frame);
                    travelled = true;
                    match cursor.step(heading) {
                        Some(next) => cursor = next,
                        None => return vanish(world, presenter, journal, travelled),
                    }
                }
            }
        }
    }
}

fn vanish(
    world: &mut World,
    presenter: &mut dyn FramePresenter,
    journal: &mut Journal,
    travelled: bool,
) -> AnyResult<ShotOutcome> {
    let frame = compose_frame(world, None);
    presenter.present(&frame, FramePacing::AnimationTick)?;
    if travelled {
        journal.append(frame);
    }
    Ok(ShotOutcome::Absorbed)
}

fn strike(
    world: &mut World,
    presenter: &mut dyn FramePresenter,
    journal: &mut Journal,
    cell: GridPos,
    outcome: ShotOutcome,
) -> AnyResult<ShotOutcome> {
    let frame = compose_frame(world, Some(Overlay::new(cell, glyph::IMPACT)));
    presenter.present(&frame, FramePacing::AnimationTick)?;
    journal.append(frame);
    Ok(outcome)
}
