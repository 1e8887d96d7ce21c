//! Pipeline Runner - a side-scrolling runner through a sales pipeline
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, run state)
//! - `catalog`: The ordered stage table the world is generated from
//! - `tuning`: Data-driven physics and layout constants
//! - `runner`: Host-facing facade (start/jump/tick/project)
//! - `feedback`: Post-run feedback collaborators
//! - `highscores`: Best-run leaderboard
//! - `autopilot`: Scripted player for demos

pub mod autopilot;
pub mod catalog;
pub mod error;
pub mod feedback;
pub mod highscores;
pub mod runner;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{HazardTier, StageCatalog, StageDefinition};
pub use error::{RunnerError, RunnerResult};
pub use highscores::HighScores;
pub use runner::Runner;
pub use tuning::Tuning;

/// Authored game constants (defaults for [`Tuning`])
pub mod consts {
    /// Horizontal world speed (pixels per tick)
    pub const SCROLL_SPEED: f32 = 2.5;
    /// Upward velocity applied by a jump (pixels per tick)
    pub const JUMP_FORCE: f32 = 14.0;
    /// Downward acceleration (pixels per tick²)
    pub const GRAVITY: f32 = 0.6;

    /// Distance between consecutive segment starts
    pub const SEGMENT_WIDTH: f32 = 390.0;
    /// Visual gap at the end of each segment (not a pitfall: narrower than the agent)
    pub const SEGMENT_GAP: f32 = 10.0;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Top edge of every landing surface
    pub const GROUND_Y: f32 = 300.0;
    pub const SURFACE_HEIGHT: f32 = 100.0;

    /// Agent defaults
    pub const AGENT_SIZE: f32 = 40.0;
    pub const AGENT_START_X: f32 = 100.0;
    pub const AGENT_START_Y: f32 = 0.0;

    /// Band below a surface top in which a falling agent still lands
    pub const LANDING_TOLERANCE: f32 = 30.0;
    /// How far below the viewport the agent may fall before the run is lost
    pub const VOID_MARGIN: f32 = 100.0;
    /// Extra distance past the viewport that segments are generated ahead
    pub const LOOK_AHEAD_MARGIN: f32 = 100.0;
    /// Entities are pruned once their trailing edge is this far behind the origin
    pub const PRUNE_MARGIN: f32 = 100.0;
    /// Distance the agent must travel past the finish line's left edge
    pub const VICTORY_MARGIN: f32 = 100.0;

    /// Stage segments generated ahead of the runway on reset
    pub const PRESPAWN_SEGMENTS: u32 = 3;
    /// Minimum distance between a hazard and either end of its surface
    pub const HAZARD_INSET: f32 = 50.0;

    /// Sign decorations
    pub const SIGN_WIDTH: f32 = 160.0;
    pub const SIGN_OFFSET_X: f32 = 20.0;
    pub const SIGN_HEIGHT_ABOVE_GROUND: f32 = 120.0;
    /// Distance from the agent over which signs fade in
    pub const SIGN_FADE_DISTANCE: f32 = 300.0;
}
