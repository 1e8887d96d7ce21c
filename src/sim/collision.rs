//! Collision detection and response for the agent
//!
//! Two kinds of contact matter: landing on a surface from above, and touching
//! a hazard. Landing uses a one-sided tolerance band under the surface top so
//! a fast-falling agent still snaps onto it; hazards use plain overlap.

use super::lane::Lane;
use super::rect::Rect;
use super::state::{Agent, Hazard, LandingSurface};

/// First surface (in x-order) the agent lands on this tick.
///
/// An agent moving upward never lands, so jumping through a surface from
/// below doesn't snap onto it.
pub fn find_landing<'a>(
    agent: &Agent,
    surfaces: &'a Lane<LandingSurface>,
    tolerance: f32,
) -> Option<&'a LandingSurface> {
    if agent.vy < 0.0 {
        return None;
    }
    surfaces
        .iter()
        .find(|surface| lands_on(&agent.rect, &surface.rect, tolerance))
}

/// Agent overlaps the surface horizontally with its bottom edge inside
/// `[surface.top, surface.top + tolerance]`
#[inline]
pub fn lands_on(agent: &Rect, surface: &Rect, tolerance: f32) -> bool {
    let bottom = agent.bottom();
    agent.overlaps_x(surface) && bottom >= surface.top() && bottom <= surface.top() + tolerance
}

/// Snap the agent onto a surface top
pub fn settle_on(agent: &mut Agent, surface: &Rect) {
    agent.rect.pos.y = surface.top() - agent.rect.height();
    agent.vy = 0.0;
    agent.grounded = true;
}

/// First hazard (in x-order) overlapping the agent
pub fn find_hazard_hit<'a>(agent: &Agent, hazards: &'a Lane<Hazard>) -> Option<&'a Hazard> {
    hazards.iter().find(|hazard| agent.rect.overlaps(&hazard.rect))
}
