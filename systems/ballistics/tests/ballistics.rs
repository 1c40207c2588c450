use anyhow::Result as AnyResult;
use tank_duel_core::{
    glyph, Direction, FiringSolution, FrameSnapshot, GridDimensions, GridPos, Mirror,
    MirrorOrientation, ShotOutcome, TankSeed,
};
use tank_duel_history::Journal;
use tank_duel_rendering::{FramePacing, FramePresenter};
use tank_duel_system_ballistics::Ballistics;
use tank_duel_world::World;

#[derive(Default)]
struct RecordingPresenter {
    frames: Vec<FrameSnapshot>,
    pacings: Vec<FramePacing>,
}

impl FramePresenter for RecordingPresenter {
    fn present(&mut self, frame: &FrameSnapshot, pacing: FramePacing) -> AnyResult<()> {
        self.frames.push(frame.clone());
        self.pacings.push(pacing);
        Ok(())
    }
}

fn scratch_journal(tag: &str) -> Journal {
    Journal::new(
        std::env::temp_dir().join(format!("tank-duel-ballistics-{tag}-{}.log", std::process::id())),
    )
}

#[test]
fn straight_shot_crosses_the_row_and_strikes_the_player() {
    let mut world = World::new(
        GridDimensions::new(10, 10),
        TankSeed::new(GridPos::new(2, 2), Direction::Right),
        TankSeed::new(GridPos::new(2, 7), Direction::Left),
        Vec::new(),
    );
    let mut presenter = RecordingPresenter::default();
    let mut journal = scratch_journal("straight");

    let outcome = Ballistics
        .animate(
            &mut world,
            FiringSolution {
                start: GridPos::new(2, 6),
                heading: Direction::Left,
            },
            &mut presenter,
            &mut journal,
        )
        .expect("animation completes");

    assert_eq!(outcome, ShotOutcome::PlayerHit);

    // Four travel frames followed by the impact flash.
    assert_eq!(presenter.frames.len(), 5);
    for (index, col) in (3..=6).rev().enumerate() {
        assert_eq!(
            presenter.frames[index].glyph_at(GridPos::new(2, col)),
            Some(glyph::BULLET_HORIZONTAL),
            "frame {index} should show the projectile at column {col}",
        );
    }
    assert_eq!(
        presenter.frames[4].glyph_at(GridPos::new(2, 2)),
        Some(glyph::IMPACT),
    );
    assert!(presenter
        .pacings
        .iter()
        .all(|pacing| *pacing == FramePacing::AnimationTick));
    assert_eq!(journal.len(), 5);
}

#[test]
fn back_slash_mirror_folds_the_shot_into_the_wall() {
    let mut world = World::new(
        GridDimensions::new(10, 10),
        TankSeed::new(GridPos::new(8, 5), Direction::Up),
        TankSeed::new(GridPos::new(8, 8), Direction::Left),
        vec![Mirror::new(GridPos::new(5, 5), MirrorOrientation::BackSlash)],
    );
    let mut presenter = RecordingPresenter::default();
    let mut journal = scratch_journal("mirror");

    let outcome = Ballistics
        .animate(
            &mut world,
            FiringSolution {
                start: GridPos::new(7, 5),
                heading: Direction::Up,
            },
            &mut presenter,
            &mut journal,
        )
        .expect("animation completes");

    assert_eq!(outcome, ShotOutcome::Absorbed);

    // Upward leg: vertical glyphs below the mirror.
    assert_eq!(
        presenter.frames[0].glyph_at(GridPos::new(7, 5)),
        Some(glyph::BULLET_VERTICAL)
    );
    assert_eq!(
        presenter.frames[1].glyph_at(GridPos::new(6, 5)),
        Some(glyph::BULLET_VERTICAL)
    );

    // Reflected leg: horizontal glyphs marching toward the west wall. The
    // mirror cell itself is skipped, so the next frame sits at column 4.
    assert_eq!(
        presenter.frames[2].glyph_at(GridPos::new(5, 4)),
        Some(glyph::BULLET_HORIZONTAL)
    );
    assert_eq!(
        presenter.frames[5].glyph_at(GridPos::new(5, 1)),
        Some(glyph::BULLET_HORIZONTAL)
    );

    // The mirror survives every frame it appears in.
    for frame in &presenter.frames {
        assert_eq!(frame.glyph_at(GridPos::new(5, 5)), Some('\\'));
    }

    // Final frame shows the arena with the projectile gone.
    let last = presenter.frames.last().expect("at least one frame");
    assert_eq!(last.glyph_at(GridPos::new(5, 1)), Some(glyph::EMPTY));
    assert_eq!(journal.len(), presenter.frames.len());
}

#[test]
fn firing_point_blank_into_the_wall_absorbs_with_zero_travel() {
    let mut world = World::new(
        GridDimensions::new(10, 10),
        TankSeed::new(GridPos::new(1, 1), Direction::Up),
        TankSeed::new(GridPos::new(8, 8), Direction::Left),
        Vec::new(),
    );
    let mut presenter = RecordingPresenter::default();
    let mut journal = scratch_journal("pointblank");

    let outcome = Ballistics
        .animate(
            &mut world,
            FiringSolution {
                start: GridPos::new(0, 1),
                heading: Direction::Up,
            },
            &mut presenter,
            &mut journal,
        )
        .expect("animation completes");

    assert_eq!(outcome, ShotOutcome::Absorbed);
    assert_eq!(presenter.frames.len(), 1);
    assert!(
        journal.is_empty(),
        "a shot that never travelled leaves no journal frames",
    );
}

#[test]
fn adjacent_enemy_takes_the_hit_on_the_first_cell() {
    let mut world = World::new(
        GridDimensions::new(10, 10),
        TankSeed::new(GridPos::new(2, 6), Direction::Right),
        TankSeed::new(GridPos::new(2, 7), Direction::Left),
        Vec::new(),
    );
    let mut presenter = RecordingPresenter::default();
    let mut journal = scratch_journal("adjacent");

    let outcome = Ballistics
        .animate(
            &mut world,
            FiringSolution {
                start: GridPos::new(2, 7),
                heading: Direction::Right,
            },
            &mut presenter,
            &mut journal,
        )
        .expect("animation completes");

    assert_eq!(outcome, ShotOutcome::EnemyHit);
    assert_eq!(presenter.frames.len(), 1);
    assert_eq!(
        presenter.frames[0].glyph_at(GridPos::new(2, 7)),
        Some(glyph::IMPACT)
    );
    assert_eq!(journal.len(), 1);
}

#[test]
fn three_mirrors_can_fold_a_shot_back_onto_the_shooter() {
    let mut world = World::new(
        GridDimensions::new(10, 10),
        TankSeed::new(GridPos::new(4, 2), Direction::Right),
        TankSeed::new(GridPos::new(7, 7), Direction::Left),
        vec![
            Mirror::new(GridPos::new(4, 6), MirrorOrientation::ForwardSlash),
            Mirror::new(GridPos::new(2, 6), MirrorOrientation::BackSlash),
            Mirror::new(GridPos::new(2, 2), MirrorOrientation::ForwardSlash),
        ],
    );
    let mut presenter = RecordingPresenter::default();
    let mut journal = scratch_journal("selfhit");

    let outcome = Ballistics
        .animate(
            &mut world,
            FiringSolution {
                start: GridPos::new(4, 3),
                heading: Direction::Right,
            },
            &mut presenter,
            &mut journal,
        )
        .expect("animation completes");

    assert_eq!(
        outcome,
        ShotOutcome::PlayerHit,
        "a fully folded lane routes the projectile back onto the player",
    );
    let last = presenter.frames.last().expect("impact frame");
    assert_eq!(last.glyph_at(GridPos::new(4, 2)), Some(glyph::IMPACT));
}

#[test]
fn travel_frames_never_keep_a_trail() {
    let mut world = World::new(
        GridDimensions::new(10, 10),
        TankSeed::new(GridPos::new(2, 2), Direction::Right),
        TankSeed::new(GridPos::new(2, 7), Direction::Left),
        Vec::new(),
    );
    let mut presenter = RecordingPresenter::default();
    let mut journal = scratch_journal("trail");

    let _ = Ballistics
        .animate(
            &mut world,
            FiringSolution {
                start: GridPos::new(2, 6),
                heading: Direction::Left,
            },
            &mut presenter,
            &mut journal,
        )
        .expect("animation completes");

    // By the second frame the first cell is empty again.
    assert_eq!(
        presenter.frames[1].glyph_at(GridPos::new(2, 6)),
        Some(glyph::EMPTY)
    );
}
