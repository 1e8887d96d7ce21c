//! Per-frame simulation tick
//!
//! Pipeline order: integrate → void check → landing → hazards → scroll and
//! prune → spawn → victory. A tick that ends the run stops right where the run
//! ended.

use super::collision::{find_hazard_hit, find_landing, settle_on};
use super::phase::{check_victory, fail};
use super::physics::{fell_into_void, integrate};
use super::spawn::spawn_segment;
use super::state::{FailureCause, RunPhase, RunState};
use crate::catalog::StageCatalog;
use crate::tuning::Tuning;

/// Advance the run by one frame. No-op outside [`RunPhase::Running`].
pub fn tick(state: &mut RunState, catalog: &StageCatalog, tuning: &Tuning) {
    if state.phase != RunPhase::Running {
        return;
    }
    state.events.clear();
    state.time_ticks += 1;

    integrate(state, tuning);

    if fell_into_void(&state.agent, tuning) {
        fail(state, FailureCause::Void);
        return;
    }

    state.agent.grounded = false;
    let landing = find_landing(&state.agent, &state.surfaces, tuning.landing_tolerance)
        .map(|surface| (surface.rect, surface.stage_title.clone()));
    if let Some((rect, title)) = landing {
        settle_on(&mut state.agent, &rect);
        state.enter_stage(&title);
    }

    // Checked after landing so a wall standing on a surface still ends the run
    if let Some(hazard) = find_hazard_hit(&state.agent, &state.hazards) {
        let title = hazard.stage_title.clone();
        let cause = FailureCause::Hazard {
            label: hazard.label.clone(),
            tier: hazard.tier,
        };
        state.enter_stage(&title);
        fail(state, cause);
        return;
    }

    scroll(state, tuning);

    if !state.finish_spawned && state.spawn_cursor < tuning.look_ahead_limit() {
        let at = state.spawn_cursor;
        spawn_segment(state, catalog, tuning, at);
    }

    check_victory(state, tuning);
}

/// Shift the world left and drop whatever has fully left the screen
pub fn scroll(state: &mut RunState, tuning: &Tuning) {
    let dx = -tuning.scroll_speed;
    state.surfaces.shift_all(dx);
    state.hazards.shift_all(dx);
    state.decorations.shift_all(dx);
    state.spawn_cursor += dx;

    let limit = -tuning.prune_margin;
    if let Some(surface) = state.surfaces.prune_front(limit) {
        log::debug!("Pruned surface {} '{}'", surface.id, surface.stage_title);
    }
    if let Some(hazard) = state.hazards.prune_front(limit) {
        log::debug!("Pruned hazard {} '{}'", hazard.id, hazard.label);
    }
    state.decorations.prune_front(limit);
}
