#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots and drives a Tank Duel match.

mod scenario;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result as AnyResult};
use clap::Parser;
use tank_duel_core::MatchOutcome;
use tank_duel_history::Journal;
use tank_duel_rendering::{FramePacing, FramePresenter};
use tank_duel_system_bootstrap::Bootstrap;
use tank_duel_system_turn::{TurnEngine, TurnStatus};
use tank_duel_terminal::{control_menu, notice, outcome_banner, read_action, TerminalPresenter};
use tank_duel_world::compose_frame;

/// Turn-based tank skirmish on a mirrored arena.
#[derive(Debug, Parser)]
#[command(name = "tank-duel")]
struct Cli {
    /// Scenario file describing the arena, tanks, and mirrors.
    scenario: PathBuf,
    /// Log file the frame journal is persisted to.
    journal: PathBuf,
}

fn main() {
    // Startup failures are reported but never change the exit status; the
    // process ends successfully either way.
    if let Err(error) = run() {
        eprintln!("{error:#}");
    }
}

fn run() -> AnyResult<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.scenario)
        .with_context(|| format!("input file cannot be opened: {}", cli.scenario.display()))?;
    let setup = scenario::parse_scenario(&text)?;

    let mut events = Vec::new();
    let mut world = Bootstrap.launch(&setup, &mut events)?;
    for event in &events {
        if let Some(message) = notice(event) {
            println!("{message}");
        }
    }

    let mut presenter = TerminalPresenter::new();
    let mut journal = Journal::new(cli.journal);
    let mut engine = TurnEngine::new();

    let opening = compose_frame(&mut world, None);
    presenter.present(&opening, FramePacing::Immediate)?;
    journal.append(opening);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let outcome = match play(
        &mut world,
        &mut engine,
        &mut presenter,
        &mut journal,
        &mut input,
        &mut events,
    )? {
        Some(outcome) => outcome,
        // The input stream ran dry mid-match; leave without a verdict.
        None => return Ok(()),
    };

    println!("{}", outcome_banner(outcome));
    Ok(())
}

fn play<R: BufRead>(
    world: &mut tank_duel_world::World,
    engine: &mut TurnEngine,
    presenter: &mut TerminalPresenter,
    journal: &mut Journal,
    input: &mut R,
    events: &mut Vec<tank_duel_core::Event>,
) -> AnyResult<Option<MatchOutcome>> {
    loop {
        print!("{}", control_menu());
        io::stdout()
            .flush()
            .context("could not flush the action prompt")?;

        let Some(action) = read_action(input)? else {
            return Ok(None);
        };

        events.clear();
        let status = engine.resolve(world, action, presenter, journal, events)?;
        for event in events.iter() {
            if let Some(message) = notice(event) {
                println!("{message}");
            }
        }

        if let TurnStatus::Ended(outcome) = status {
            return Ok(Some(outcome));
        }
    }
}
