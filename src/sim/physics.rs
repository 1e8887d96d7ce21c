//! Agent integration and jumping

use super::state::{Agent, RunState};
use crate::tuning::Tuning;

/// Advance the agent one tick under gravity and accumulate scroll distance.
///
/// Unconditional: landing corrections happen afterwards in collision.
pub fn integrate(state: &mut RunState, tuning: &Tuning) {
    state.agent.vy += tuning.gravity;
    state.agent.rect.pos.y += state.agent.vy;
    state.distance += tuning.scroll_speed;
}

/// Launch the agent if it is standing on something.
///
/// Returns whether the jump took effect. Airborne calls are ignored; there is
/// no double jump and no input buffering.
pub fn jump(agent: &mut Agent, tuning: &Tuning) -> bool {
    if !agent.grounded {
        return false;
    }
    agent.vy = -tuning.jump_force;
    agent.grounded = false;
    true
}

/// Whether the agent has fallen out of the world
#[inline]
pub fn fell_into_void(agent: &Agent, tuning: &Tuning) -> bool {
    agent.rect.top() > tuning.void_threshold()
}
