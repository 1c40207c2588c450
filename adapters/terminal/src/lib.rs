#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! ANSI terminal adapter: frame presentation, notices, and keyboard input.
//!
//! All formatting lives in pure functions so it stays testable; only
//! [`TerminalPresenter::present`] and [`read_action`] touch the process's
//! actual streams.

use std::{
    io::{BufRead, Write},
    thread,
};

use anyhow::{Context, Result as AnyResult};
use tank_duel_core::{keys, Action, Event, FrameSnapshot, MatchOutcome};
use tank_duel_rendering::{FramePacing, FramePresenter, ANIMATION_TICK};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const LIGHT_GREEN: &str = "\x1b[38;5;0;48;5;194m";
const BRIGHT_RED: &str = "\x1b[48;5;1m";
const ERROR_RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Presenter that clears the terminal and draws each frame in place.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    /// Creates a presenter writing to the process's standard output.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FramePresenter for TerminalPresenter {
    fn present(&mut self, frame: &FrameSnapshot, pacing: FramePacing) -> AnyResult<()> {
        if pacing == FramePacing::AnimationTick {
            thread::sleep(ANIMATION_TICK);
        }

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(render_frame(frame).as_bytes())
            .context("could not draw the arena frame")?;
        handle.flush().context("could not flush the terminal")?;
        Ok(())
    }
}

/// Renders a frame into the byte sequence sent to the terminal.
#[must_use]
pub fn render_frame(frame: &FrameSnapshot) -> String {
    let mut rendered = String::from(CLEAR_SCREEN);
    for line in frame.lines() {
        rendered.push_str(&line);
        rendered.push('\n');
    }
    rendered
}

/// Control summary printed before every prompt.
#[must_use]
pub fn control_menu() -> String {
    format!(
        "{} to go/face up\n{} to go/face down\n{} to go/face left\n{} to go/face right\n{} to shoot laser\n{} to print log file\naction: ",
        keys::UP,
        keys::DOWN,
        keys::LEFT,
        keys::RIGHT,
        keys::SHOOT,
        keys::SAVE,
    )
}

/// Colored banner announcing the match result.
#[must_use]
pub fn outcome_banner(outcome: MatchOutcome) -> String {
    match outcome {
        MatchOutcome::PlayerWin => format!("{LIGHT_GREEN}You Won! :D{RESET}"),
        MatchOutcome::PlayerLoss => format!("{BRIGHT_RED}You Lost! :({RESET}"),
    }
}

/// Text shown to the player for events worth narrating.
///
/// Rotations, moves, and shot resolutions are visible in the frame itself
/// and produce no extra text.
#[must_use]
pub fn notice(event: &Event) -> Option<String> {
    match event {
        Event::InvalidInput => Some(format!("{ERROR_RED}Invalid User Input{RESET}")),
        Event::MirrorRejected { position } => Some(format!(
            "{ERROR_RED}Mirror at row {}, column {} overlaps a tank and was ignored{RESET}",
            position.row(),
            position.col(),
        )),
        Event::JournalSaveFailed { reason } => {
            Some(format!("{ERROR_RED}Game Save Error: {reason}{RESET}"))
        }
        Event::NothingToSave => Some("There is nothing to save".to_owned()),
        Event::JournalSaved { frames } => {
            Some(format!("Saved {frames} frames to the log file"))
        }
        Event::TankRotated { .. }
        | Event::TankMoved { .. }
        | Event::MoveRejected { .. }
        | Event::ShotResolved { .. } => None,
    }
}

/// Reads the next action from the player.
///
/// Returns `Ok(None)` once the input stream is exhausted. Blank lines and
/// unassigned keys both surface as [`Action::Unknown`] so the turn engine
/// can narrate the rejection.
pub fn read_action<R: BufRead>(reader: &mut R) -> AnyResult<Option<Action>> {
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .context("could not read the next action")?;
    if bytes == 0 {
        return Ok(None);
    }

    let action = line
        .trim()
        .chars()
        .next()
        .map_or(Action::Unknown, Action::from_key);
    Ok(Some(action))
}
