//! Run phase transitions
//!
//! ```text
//! Idle | Failed | Succeeded --reset--> Running
//! Running --void fall / hazard--> Failed
//! Running --past finish line--> Succeeded
//! ```
//!
//! Terminal phases freeze the state: [`super::tick`] is a no-op until the
//! next reset.

use super::spawn::{spawn_runway, spawn_segment};
use super::state::{FailureCause, RunEvent, RunPhase, RunState};
use crate::catalog::StageCatalog;
use crate::tuning::Tuning;

/// Build a fresh running state: new agent, runway, and a few stages ahead
pub fn reset_run(catalog: &StageCatalog, tuning: &Tuning, seed: u64) -> RunState {
    let mut state = RunState::idle(seed, tuning);
    spawn_runway(&mut state, tuning);
    for _ in 0..tuning.prespawn_segments {
        if state.finish_spawned {
            break;
        }
        let at = state.spawn_cursor;
        spawn_segment(&mut state, catalog, tuning, at);
    }
    state.phase = RunPhase::Running;
    log::info!(
        "Run started (seed {}, {} stages, {} pre-spawned)",
        seed,
        catalog.len(),
        state.stage_index
    );
    state
}

/// Running → Failed
pub fn fail(state: &mut RunState, cause: FailureCause) {
    debug_assert_eq!(state.phase, RunPhase::Running);
    match &cause {
        FailureCause::Void => log::info!(
            "Run failed: fell into the void after {} ticks",
            state.time_ticks
        ),
        FailureCause::Hazard { label, tier } => log::info!(
            "Run failed: hit {} hazard '{}' in '{}'",
            tier.as_str(),
            label,
            state.current_stage
        ),
    }
    state.phase = RunPhase::Failed;
    state.failure = Some(cause.clone());
    state.events.push(RunEvent::Failed { cause });
}

/// Running → Succeeded once the agent is far enough past the finish line
pub fn check_victory(state: &mut RunState, tuning: &Tuning) -> bool {
    let crossed = state
        .finish_surface()
        .is_some_and(|finish| state.agent.rect.left() > finish.rect.left() + tuning.victory_margin);
    if crossed {
        log::info!(
            "Run succeeded: score {} in {} ticks",
            state.score(),
            state.time_ticks
        );
        state.phase = RunPhase::Succeeded;
        state.events.push(RunEvent::Succeeded);
    }
    crossed
}
