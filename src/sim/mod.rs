//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Entities kept in x-order lanes
//! - No rendering or platform dependencies

pub mod collision;
pub mod lane;
pub mod phase;
pub mod physics;
pub mod projection;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{find_hazard_hit, find_landing};
pub use lane::{Lane, Spanned};
pub use phase::reset_run;
pub use physics::jump;
pub use projection::{Appearance, Projection, project, sign_appearance};
pub use rect::Rect;
pub use spawn::spawn_segment;
pub use state::{
    Agent, Decoration, FailureCause, Hazard, LandingSurface, RunEvent, RunPhase, RunState,
    SurfaceKind, FINISH_TITLE, START_TITLE,
};
pub use tick::tick;
