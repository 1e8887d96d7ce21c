//! Scripted player for demos and attract mode
//!
//! Jumps so the top of the arc lines up with the centre of the next hazard.

use crate::runner::Runner;
use crate::sim::RunState;
use crate::tuning::Tuning;

/// Gap between agent and hazard at which a jump centres the arc over it
pub fn ideal_gap(tuning: &Tuning, hazard_width: f32) -> f32 {
    let ticks_to_apex = tuning.jump_force / tuning.gravity;
    ticks_to_apex * tuning.scroll_speed - (tuning.agent_size + hazard_width) / 2.0
}

/// Whether the agent should jump now
pub fn should_jump(state: &RunState, tuning: &Tuning) -> bool {
    if !state.agent.grounded {
        return false;
    }
    let agent = &state.agent.rect;
    state
        .hazards
        .iter()
        .find(|h| h.rect.right() > agent.left())
        .is_some_and(|next| {
            let gap = next.rect.left() - agent.right();
            gap > 0.0 && gap <= ideal_gap(tuning, next.rect.width())
        })
}

/// Jump on the runner's behalf when the timing is right
pub fn steer(runner: &mut Runner) -> bool {
    should_jump(runner.state(), runner.tuning()) && runner.jump()
}
