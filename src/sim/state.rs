//! Run state and core simulation types
//!
//! Everything a run mutates lives in [`RunState`]. A reset replaces it
//! wholesale; ticks mutate it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lane::{Lane, Spanned};
use super::rect::Rect;
use crate::catalog::HazardTier;
use crate::consts::SIGN_WIDTH;
use crate::tuning::Tuning;

/// Title shown before the agent has landed on any stage
pub const START_TITLE: &str = "Start";
/// Title of the terminal surface
pub const FINISH_TITLE: &str = "REVENUE MOUNTAIN";

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Ticks advance the world
    Running,
    /// Fell into the void or hit a hazard
    Failed,
    /// Crossed the finish line
    Succeeded,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Failed | RunPhase::Succeeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "Idle",
            RunPhase::Running => "Running",
            RunPhase::Failed => "Failed",
            RunPhase::Succeeded => "Succeeded",
        }
    }
}

/// Why a run failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FailureCause {
    /// Agent dropped below the void threshold
    Void,
    /// Agent touched a hazard
    Hazard { label: String, tier: HazardTier },
}

/// Things the host may want to react to, recorded by the most recent tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    StageEntered { title: String },
    Failed { cause: FailureCause },
    Succeeded,
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub rect: Rect,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    pub grounded: bool,
}

impl Agent {
    /// Fresh agent at the start position, airborne above the runway
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            rect: Rect::new(
                tuning.agent_start_x,
                tuning.agent_start_y,
                tuning.agent_size,
                tuning.agent_size,
            ),
            vy: 0.0,
            grounded: false,
        }
    }
}

/// What a landing surface represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Safe ground placed at reset
    Runway,
    /// Ground of a catalog stage
    Stage,
    /// Terminal surface after the last stage
    Finish,
}

/// Ground the agent can stand on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingSurface {
    pub id: u32,
    pub rect: Rect,
    pub kind: SurfaceKind,
    pub stage_title: String,
    pub role: String,
    pub visual_tag: String,
    /// Reserved for pitfall segments; never set by the default generator
    #[serde(default)]
    pub pitfall: bool,
}

/// A pain point: touching it ends the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub rect: Rect,
    pub label: String,
    /// Stage this hazard was spawned for
    pub stage_title: String,
    pub tier: HazardTier,
}

/// Cosmetic stage sign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoration {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    pub sub_text: Option<String>,
}

impl Spanned for LandingSurface {
    fn left(&self) -> f32 {
        self.rect.left()
    }
    fn width(&self) -> f32 {
        self.rect.width()
    }
    fn shift(&mut self, dx: f32) {
        self.rect.pos.x += dx;
    }
}

impl Spanned for Hazard {
    fn left(&self) -> f32 {
        self.rect.left()
    }
    fn width(&self) -> f32 {
        self.rect.width()
    }
    fn shift(&mut self, dx: f32) {
        self.rect.pos.x += dx;
    }
}

impl Spanned for Decoration {
    fn left(&self) -> f32 {
        self.pos.x
    }
    fn width(&self) -> f32 {
        SIGN_WIDTH
    }
    fn shift(&mut self, dx: f32) {
        self.pos.x += dx;
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Seed for this run's generator
    pub seed: u64,
    /// Drives hazard placement and pain selection
    pub rng: Pcg32,
    pub phase: RunPhase,
    pub agent: Agent,
    pub surfaces: Lane<LandingSurface>,
    pub hazards: Lane<Hazard>,
    pub decorations: Lane<Decoration>,
    /// Next catalog entry to spawn (never decreases within a run)
    pub stage_index: usize,
    /// World x where the next segment goes
    pub spawn_cursor: f32,
    /// Set once the finish surface has been appended
    pub finish_spawned: bool,
    /// Cumulative scroll distance
    pub distance: f32,
    pub current_stage: String,
    pub failure: Option<FailureCause>,
    /// Ticks simulated this run
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<RunEvent>,
    next_id: u32,
}

impl RunState {
    /// Empty, idle state (before the first start)
    pub fn idle(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Idle,
            agent: Agent::spawn(tuning),
            surfaces: Lane::new(),
            hazards: Lane::new(),
            decorations: Lane::new(),
            stage_index: 0,
            spawn_cursor: 0.0,
            finish_spawned: false,
            distance: 0.0,
            current_stage: START_TITLE.to_string(),
            failure: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The terminal surface, if it is still in the world
    pub fn finish_surface(&self) -> Option<&LandingSurface> {
        self.surfaces.iter().find(|s| s.kind == SurfaceKind::Finish)
    }

    /// floor(distance / 10)
    pub fn score(&self) -> u64 {
        (self.distance / 10.0).floor() as u64
    }

    /// Switch the displayed stage, recording an event when it changes
    pub fn enter_stage(&mut self, title: &str) {
        if self.current_stage != title {
            log::debug!("Entered stage '{}'", title);
            self.current_stage = title.to_string();
            self.events.push(RunEvent::StageEntered {
                title: title.to_string(),
            });
        }
    }
}
