//! Read-only snapshot handed to the presentation layer
//!
//! Valid until the next tick. Decoration animation is derived here from
//! positions alone, so nothing cosmetic is ever stored in the run state.

use glam::Vec2;
use serde::Serialize;

use super::rect::Rect;
use super::state::{Decoration, Hazard, LandingSurface, RunPhase, RunState};
use crate::tuning::Tuning;

/// Opacity and scale of a sign
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Appearance {
    pub opacity: f32,
    pub scale: f32,
}

/// Signs fade in as the agent approaches and out as it passes.
///
/// Pure in `(sign_x, agent_x)`: fully visible at the agent, invisible at
/// `fade_distance` or further.
pub fn sign_appearance(sign_x: f32, agent_x: f32, fade_distance: f32) -> Appearance {
    let opacity = if fade_distance > 0.0 {
        (1.0 - (sign_x - agent_x).abs() / fade_distance).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Appearance {
        opacity,
        scale: 0.8 + 0.2 * opacity,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentView {
    pub rect: Rect,
    pub grounded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecorationView {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    pub sub_text: Option<String>,
    pub appearance: Appearance,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub agent: AgentView,
    /// Ordered by ascending x
    pub surfaces: Vec<LandingSurface>,
    /// Ordered by ascending x
    pub hazards: Vec<Hazard>,
    /// Ordered by ascending x
    pub decorations: Vec<DecorationView>,
    pub phase: RunPhase,
    pub current_stage: String,
    pub distance: f32,
    /// floor(distance / 10)
    pub score: u64,
}

pub fn project(state: &RunState, tuning: &Tuning) -> Projection {
    let agent_x = state.agent.rect.left();
    Projection {
        agent: AgentView {
            rect: state.agent.rect,
            grounded: state.agent.grounded,
        },
        surfaces: state.surfaces.to_vec(),
        hazards: state.hazards.to_vec(),
        decorations: state
            .decorations
            .iter()
            .map(|d| decoration_view(d, agent_x, tuning))
            .collect(),
        phase: state.phase,
        current_stage: state.current_stage.clone(),
        distance: state.distance,
        score: state.score(),
    }
}

fn decoration_view(decoration: &Decoration, agent_x: f32, tuning: &Tuning) -> DecorationView {
    DecorationView {
        id: decoration.id,
        pos: decoration.pos,
        text: decoration.text.clone(),
        sub_text: decoration.sub_text.clone(),
        appearance: sign_appearance(decoration.pos.x, agent_x, tuning.sign_fade_distance),
    }
}
