#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn state machine driving a Tank Duel match.
//!
//! Each resolved action walks `AwaitingInput → {Turning, Moved, Shot} →
//! AwaitingInput` until a shot produces a terminal outcome. The engine owns
//! no world state; it sequences commands, the line-of-sight evaluator, and
//! the ballistics run, and narrates everything through events.

use anyhow::Result as AnyResult;
use tank_duel_core::{
    Action, Command, Direction, Event, FiringSolution, MatchOutcome, ShotOutcome,
};
use tank_duel_history::Journal;
use tank_duel_rendering::{FramePacing, FramePresenter};
use tank_duel_system_ballistics::Ballistics;
use tank_duel_system_line_of_sight::LineOfSight;
use tank_duel_world::{apply, compose_frame, query, World};

/// Phase reached by the most recently resolved action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// No action has been resolved yet, or the last one changed nothing.
    AwaitingInput,
    /// The player tank rotated in place.
    Turning,
    /// The player tank advanced one cell.
    Moved,
    /// A projectile run resolved without ending the match.
    Shot,
    /// The match is over; further actions are ignored.
    Ended(MatchOutcome),
}

impl Default for TurnPhase {
    fn default() -> Self {
        Self::AwaitingInput
    }
}

/// Whether the match continues after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// The match keeps accepting actions.
    Continuing,
    /// The match reached a terminal outcome.
    Ended(MatchOutcome),
}

/// State machine that resolves player actions into match progress.
#[derive(Debug, Default)]
pub struct TurnEngine {
    phase: TurnPhase,
    line_of_sight: LineOfSight,
    ballistics: Ballistics,
}

impl TurnEngine {
    /// Creates an engine awaiting its first action.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase reached by the most recently resolved action.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Resolves one player action against the world.
    ///
    /// Every frame shown to the player flows through `presenter`; frames of
    /// consequence (committed turns, moves, and projectile ticks) are also
    /// recorded in `journal`. Once the match has ended the engine keeps
    /// reporting the same terminal status without touching the world.
    pub fn resolve(
        &mut self,
        world: &mut World,
        action: Action,
        presenter: &mut dyn FramePresenter,
        journal: &mut Journal,
        out_events: &mut Vec<Event>,
    ) -> AnyResult<TurnStatus> {
        if let TurnPhase::Ended(outcome) = self.phase {
            return Ok(TurnStatus::Ended(outcome));
        }

        match action {
            Action::Steer(heading) => self.steer(world, heading, presenter, journal, out_events),
            Action::Shoot => self.shoot(world, presenter, journal, out_events),
            Action::SaveJournal => {
                self.phase = TurnPhase::AwaitingInput;
                save_journal(journal, out_events);
                let frame = compose_frame(world, None);
                presenter.present(&frame, FramePacing::Immediate)?;
                Ok(TurnStatus::Continuing)
            }
            Action::Unknown => {
                self.phase = TurnPhase::AwaitingInput;
                out_events.push(Event::InvalidInput);
                let frame = compose_frame(world, None);
                presenter.present(&frame, FramePacing::Immediate)?;
                Ok(TurnStatus::Continuing)
            }
        }
    }

    fn steer(
        &mut self,
        world: &mut World,
        heading: Direction,
        presenter: &mut dyn FramePresenter,
        journal: &mut Journal,
        out_events: &mut Vec<Event>,
    ) -> AnyResult<TurnStatus> {
        let facing = query::player(world).facing;

        if heading != facing {
            apply(world, Command::Face { heading }, out_events);
            self.phase = TurnPhase::Turning;
            let frame = compose_frame(world, None);
            presenter.present(&frame, FramePacing::Immediate)?;
            journal.append(frame);
            return Ok(TurnStatus::Continuing);
        }

        let watermark = out_events.len();
        apply(world, Command::Advance { heading }, out_events);
        let moved = out_events[watermark..]
            .iter()
            .any(|event| matches!(event, Event::TankMoved { .. }));

        if !moved {
            // Silently absorbed: re-render only, nothing enters the journal.
            self.phase = TurnPhase::AwaitingInput;
            let frame = compose_frame(world, None);
            presenter.present(&frame, FramePacing::Immediate)?;
            return Ok(TurnStatus::Continuing);
        }

        self.phase = TurnPhase::Moved;
        let frame = compose_frame(world, None);
        presenter.present(&frame, FramePacing::Immediate)?;
        journal.append(frame);

        let solution = {
            let world_view: &World = world;
            let player = query::player(world_view);
            let enemy = query::enemy(world_view);
            self.line_of_sight
                .evaluate(enemy.position, enemy.facing, player.position, |cell| {
                    query::is_cell_obstructed(world_view, cell)
                })
        };

        let Some(solution) = solution else {
            return Ok(TurnStatus::Continuing);
        };

        let outcome = self
            .ballistics
            .animate(world, solution, presenter, journal)?;
        out_events.push(Event::ShotResolved { outcome });
        Ok(self.conclude(outcome, journal, out_events))
    }

    fn shoot(
        &mut self,
        world: &mut World,
        presenter: &mut dyn FramePresenter,
        journal: &mut Journal,
        out_events: &mut Vec<Event>,
    ) -> AnyResult<TurnStatus> {
        let player = query::player(world);
        let Some(start) = player.position.step(player.facing) else {
            // Unreachable from a validated interior position, but a muzzle
            // with nowhere to point still resolves as an absorbed shot.
            self.phase = TurnPhase::Shot;
            out_events.push(Event::ShotResolved {
                outcome: ShotOutcome::Absorbed,
            });
            let frame = compose_frame(world, None);
            presenter.present(&frame, FramePacing::Immediate)?;
            return Ok(TurnStatus::Continuing);
        };

        let outcome = self.ballistics.animate(
            world,
            FiringSolution {
                start,
                heading: player.facing,
            },
            presenter,
            journal,
        )?;
        out_events.push(Event::ShotResolved { outcome });
        Ok(self.conclude(outcome, journal, out_events))
    }

    fn conclude(
        &mut self,
        outcome: ShotOutcome,
        journal: &mut Journal,
        out_events: &mut Vec<Event>,
    ) -> TurnStatus {
        let terminal = match outcome {
            ShotOutcome::PlayerHit => Some(MatchOutcome::PlayerLoss),
            ShotOutcome::EnemyHit => Some(MatchOutcome::PlayerWin),
            ShotOutcome::Absorbed => None,
        };

        match terminal {
            Some(result) => {
                self.phase = TurnPhase::Ended(result);
                save_journal(journal, out_events);
                TurnStatus::Ended(result)
            }
            None => {
                self.phase = TurnPhase::Shot;
                TurnStatus::Continuing
            }
        }
    }
}

fn save_journal(journal: &Journal, out_events: &mut Vec<Event>) {
    if journal.is_empty() {
        out_events.push(Event::NothingToSave);
        return;
    }

    match journal.persist() {
        Ok(frames) => out_events.push(Event::JournalSaved { frames }),
        Err(error) => out_events.push(Event::JournalSaveFailed {
            reason: error.to_string(),
        }),
    }
}
