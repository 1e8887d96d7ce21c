//! End-to-end runs through the public `Runner` API

use pipeline_runner::sim::{FailureCause, RunPhase, START_TITLE, SurfaceKind};
use pipeline_runner::{HazardTier, Runner, StageCatalog, StageDefinition, Tuning, autopilot};

const MAX_TICKS: usize = 10_000;

fn single_stage(tier: HazardTier) -> StageCatalog {
    StageCatalog::new(vec![StageDefinition::new(
        "only",
        "Only Stage",
        "SDR",
        "bg-yellow-500",
        &["Pain"],
        tier,
    )])
    .unwrap()
}

/// Tick until the run ends, letting `input` act before every tick
fn play(runner: &mut Runner, mut input: impl FnMut(&mut Runner)) -> RunPhase {
    for _ in 0..MAX_TICKS {
        input(runner);
        runner.tick();
        if runner.phase().is_terminal() {
            break;
        }
    }
    runner.phase()
}

fn settle(runner: &mut Runner) {
    for _ in 0..200 {
        runner.tick();
        if runner.state().agent.grounded {
            return;
        }
    }
    panic!("agent never landed");
}

#[test]
fn trivial_stage_cleared_with_one_jump() {
    let mut runner = Runner::new(single_stage(HazardTier::Trivial), Tuning::default(), 11);
    runner.start();

    let mut jumps = 0;
    let phase = play(&mut runner, |r| {
        if autopilot::steer(r) {
            jumps += 1;
        }
    });

    assert_eq!(phase, RunPhase::Succeeded);
    assert_eq!(jumps, 1);
    assert_eq!(runner.project().current_stage, "REVENUE MOUNTAIN");
}

#[test]
fn trivial_stage_succeeds_for_many_seeds() {
    for seed in 0..20 {
        let mut runner = Runner::new(single_stage(HazardTier::Trivial), Tuning::default(), seed);
        runner.start();
        let phase = play(&mut runner, |r| {
            autopilot::steer(r);
        });
        assert_eq!(phase, RunPhase::Succeeded, "seed {seed}");
    }
}

#[test]
fn impossible_stage_always_fails() {
    let mut runner = Runner::new(single_stage(HazardTier::Impossible), Tuning::default(), 4);
    runner.start();

    // Best effort: the autopilot times the jump perfectly and still hits the wall
    let phase = play(&mut runner, |r| {
        autopilot::steer(r);
    });

    assert_eq!(phase, RunPhase::Failed);
    assert!(matches!(
        runner.state().failure,
        Some(FailureCause::Hazard {
            tier: HazardTier::Impossible,
            ..
        })
    ));
    assert_eq!(runner.project().current_stage, "Only Stage");
}

#[test]
fn no_input_fails_at_first_hazard() {
    let mut runner = Runner::with_seed(8);
    runner.start();
    let first_hazard = runner.state().hazards.front().unwrap().label.clone();

    let phase = play(&mut runner, |_| {});

    assert_eq!(phase, RunPhase::Failed);
    assert_eq!(runner.project().current_stage, "Prospecting");
    match &runner.state().failure {
        Some(FailureCause::Hazard { label, tier }) => {
            assert_eq!(label, &first_hazard);
            assert_eq!(*tier, HazardTier::Trivial);
        }
        other => panic!("unexpected failure {other:?}"),
    }
}

#[test]
fn default_pipeline_stops_at_the_closing_wall() {
    let mut runner = Runner::with_seed(21);
    runner.start();
    let phase = play(&mut runner, |r| {
        autopilot::steer(r);
    });

    assert_eq!(phase, RunPhase::Failed);
    assert_eq!(runner.project().current_stage, "Closing");
    let context = runner.feedback_context().unwrap();
    assert_eq!(
        context.suggested_text,
        "An RFP at the Closing stage is impossible to overcome."
    );
}

#[test]
fn reset_after_failure_restores_start() {
    let tuning = Tuning::default();
    let mut runner = Runner::with_seed(5);
    runner.start();
    play(&mut runner, |_| {});
    assert_eq!(runner.phase(), RunPhase::Failed);

    runner.reset();

    let state = runner.state();
    assert_eq!(state.phase, RunPhase::Running);
    assert_eq!(state.agent.rect.left(), tuning.agent_start_x);
    assert_eq!(state.agent.rect.top(), tuning.agent_start_y);
    assert_eq!(state.distance, 0.0);
    assert_eq!(state.current_stage, START_TITLE);
    assert!(state.failure.is_none());
    // Pre-spawning restarted from the first catalog entry
    assert_eq!(state.stage_index, tuning.prespawn_segments as usize);
    assert_eq!(state.surfaces.front().unwrap().kind, SurfaceKind::Runway);
    let first_stage = state.surfaces.iter().nth(1).unwrap();
    assert_eq!(first_stage.stage_title, "Prospecting");
    assert!(!state.hazards.is_empty());
    assert!(!state.decorations.is_empty());
}

#[test]
fn reset_after_success_restores_start() {
    let mut runner = Runner::new(StageCatalog::default(), Tuning::default(), 2);
    runner.start();
    assert_eq!(play(&mut runner, |_| {}), RunPhase::Succeeded);

    runner.reset();
    assert_eq!(runner.phase(), RunPhase::Running);
    assert_eq!(runner.state().distance, 0.0);
    assert!(!runner.project().surfaces.is_empty());
}

#[test]
fn no_double_jump() {
    let tuning = Tuning::default();
    let mut runner = Runner::new(single_stage(HazardTier::Trivial), tuning.clone(), 3);
    runner.start();
    settle(&mut runner);

    assert!(runner.jump());
    assert!(!runner.jump());
    assert_eq!(runner.state().agent.vy, -tuning.jump_force);

    // Still airborne a few ticks later: jumping stays a no-op
    runner.tick();
    runner.tick();
    let vy = runner.state().agent.vy;
    assert!(!runner.jump());
    assert_eq!(runner.state().agent.vy, vy);
}

#[test]
fn empty_catalog_runs_straight_to_the_finish() {
    let mut runner = Runner::new(StageCatalog::default(), Tuning::default(), 1);
    runner.start();
    assert!(runner.state().hazards.is_empty());
    assert_eq!(play(&mut runner, |_| {}), RunPhase::Succeeded);
}

#[test]
fn terminal_phase_freezes_projection() {
    let mut runner = Runner::with_seed(8);
    runner.start();
    play(&mut runner, |_| {});
    let before = serde_json::to_string(&runner.project()).unwrap();

    for _ in 0..10 {
        runner.tick();
        runner.jump();
    }

    assert_eq!(serde_json::to_string(&runner.project()).unwrap(), before);
}

#[test]
fn same_seed_same_run() {
    let mut a = Runner::with_seed(77);
    let mut b = Runner::with_seed(77);
    a.start();
    b.start();
    for _ in 0..600 {
        autopilot::steer(&mut a);
        autopilot::steer(&mut b);
        a.tick();
        b.tick();
    }
    assert_eq!(
        serde_json::to_string(&a.project()).unwrap(),
        serde_json::to_string(&b.project()).unwrap()
    );
}

#[test]
fn score_tracks_distance() {
    let mut runner = Runner::with_seed(8);
    runner.start();
    for _ in 0..9 {
        runner.tick();
    }
    let view = runner.project();
    assert_eq!(view.distance, 22.5);
    assert_eq!(view.score, 2);
}
