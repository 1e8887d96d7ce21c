//! World generation
//!
//! Each call to [`spawn_segment`] turns the next catalog stage into a landing
//! surface, one hazard on top of it and a sign. Once the catalog runs out it
//! places a single wide finish surface instead.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{
    Decoration, FINISH_TITLE, Hazard, LandingSurface, RunState, START_TITLE, SurfaceKind,
};
use crate::catalog::StageCatalog;
use crate::consts::{SIGN_HEIGHT_ABOVE_GROUND, SIGN_OFFSET_X};
use crate::tuning::Tuning;

/// Place the hazard-free starting surface at x = 0
pub fn spawn_runway(state: &mut RunState, tuning: &Tuning) {
    let surface = LandingSurface {
        id: state.next_entity_id(),
        rect: Rect::new(
            0.0,
            tuning.ground_y,
            tuning.surface_width(),
            tuning.surface_height,
        ),
        kind: SurfaceKind::Runway,
        stage_title: START_TITLE.to_string(),
        role: String::new(),
        visual_tag: String::new(),
        pitfall: false,
    };
    state.surfaces.push_back(surface);
    state.spawn_cursor = tuning.segment_width;
}

/// Materialize the next segment at `at_x`.
///
/// Idempotent once the catalog is exhausted: the finish surface is only ever
/// appended once and the stage index stops advancing.
pub fn spawn_segment(state: &mut RunState, catalog: &StageCatalog, tuning: &Tuning, at_x: f32) {
    let Some(stage) = catalog.get(state.stage_index) else {
        spawn_finish(state, tuning, at_x);
        return;
    };

    let surface_width = tuning.surface_width();
    let surface = LandingSurface {
        id: state.next_entity_id(),
        rect: Rect::new(at_x, tuning.ground_y, surface_width, tuning.surface_height),
        kind: SurfaceKind::Stage,
        stage_title: stage.title.clone(),
        role: stage.role.clone(),
        visual_tag: stage.visual_tag.clone(),
        pitfall: false,
    };
    state.surfaces.push_back(surface);

    // Pain label and placement both come from the run's stream so a seed
    // reproduces the whole world
    let label = stage.pains[state.rng.random_range(0..stage.pains.len())].clone();
    let (height, width) = stage.tier.dimensions();
    let slack = (surface_width - 2.0 * tuning.hazard_inset - width).max(0.0);
    let offset = tuning.hazard_inset + state.rng.random_range(0.0..=slack);

    let hazard = Hazard {
        id: state.next_entity_id(),
        rect: Rect::new(at_x + offset, tuning.ground_y - height, width, height),
        label,
        stage_title: stage.title.clone(),
        tier: stage.tier,
    };
    log::debug!(
        "Spawned stage {} '{}' at x={:.1} with {} hazard '{}'",
        state.stage_index,
        stage.title,
        at_x,
        stage.tier.as_str(),
        hazard.label
    );
    state.hazards.push_back(hazard);

    let sign = Decoration {
        id: state.next_entity_id(),
        pos: Vec2::new(
            at_x + SIGN_OFFSET_X,
            tuning.ground_y - SIGN_HEIGHT_ABOVE_GROUND,
        ),
        text: stage.title.clone(),
        sub_text: (!stage.role.is_empty()).then(|| stage.role.clone()),
    };
    state.decorations.push_back(sign);

    state.spawn_cursor = at_x + tuning.segment_width;
    state.stage_index += 1;
}

fn spawn_finish(state: &mut RunState, tuning: &Tuning, at_x: f32) {
    if state.finish_spawned {
        return;
    }
    let width = tuning.finish_width();
    let surface = LandingSurface {
        id: state.next_entity_id(),
        rect: Rect::new(at_x, tuning.ground_y, width, tuning.surface_height),
        kind: SurfaceKind::Finish,
        stage_title: FINISH_TITLE.to_string(),
        role: "Victory".to_string(),
        visual_tag: "bg-yellow-400".to_string(),
        pitfall: false,
    };
    log::info!("Catalog exhausted, finish line at x={:.1}", at_x);
    state.surfaces.push_back(surface);
    state.spawn_cursor = at_x + width;
    state.finish_spawned = true;
}
