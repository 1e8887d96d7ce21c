//! Physics and layout tuning
//!
//! Defaults are the authored constants in [`crate::consts`]. A host may load an
//! override from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{RunnerError, RunnerResult};

/// Data-driven simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Initial upward speed of a jump
    pub jump_force: f32,
    /// World scroll speed per tick
    pub scroll_speed: f32,

    // === Layout ===
    /// Distance between consecutive segment starts
    pub segment_width: f32,
    /// Empty space at the end of each segment
    pub segment_gap: f32,
    pub ground_y: f32,
    pub surface_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Agent ===
    pub agent_size: f32,
    pub agent_start_x: f32,
    pub agent_start_y: f32,

    // === Margins ===
    pub landing_tolerance: f32,
    pub void_margin: f32,
    pub look_ahead_margin: f32,
    pub prune_margin: f32,
    pub victory_margin: f32,
    pub hazard_inset: f32,

    // === Generation ===
    /// Stage segments generated ahead of the runway on reset
    pub prespawn_segments: u32,
    /// Distance over which sign decorations fade in
    pub sign_fade_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            scroll_speed: SCROLL_SPEED,

            segment_width: SEGMENT_WIDTH,
            segment_gap: SEGMENT_GAP,
            ground_y: GROUND_Y,
            surface_height: SURFACE_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            agent_size: AGENT_SIZE,
            agent_start_x: AGENT_START_X,
            agent_start_y: AGENT_START_Y,

            landing_tolerance: LANDING_TOLERANCE,
            void_margin: VOID_MARGIN,
            look_ahead_margin: LOOK_AHEAD_MARGIN,
            prune_margin: PRUNE_MARGIN,
            victory_margin: VICTORY_MARGIN,
            hazard_inset: HAZARD_INSET,

            prespawn_segments: PRESPAWN_SEGMENTS,
            sign_fade_distance: SIGN_FADE_DISTANCE,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning override
    pub fn from_json(json: &str) -> RunnerResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: gravity={} jump={} speed={}",
            tuning.gravity,
            tuning.jump_force,
            tuning.scroll_speed
        );
        Ok(tuning)
    }

    /// Reject values that would break the tick pipeline's invariants
    pub fn validate(&self) -> RunnerResult<()> {
        let positive = [
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("scroll_speed", self.scroll_speed),
            ("segment_width", self.segment_width),
            ("agent_size", self.agent_size),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(RunnerError::InvalidTuning {
                    field,
                    requirement: "positive",
                });
            }
        }
        if self.segment_gap < 0.0 || self.segment_gap >= self.agent_size {
            return Err(RunnerError::InvalidTuning {
                field: "segment_gap",
                requirement: "non-negative and narrower than the agent",
            });
        }
        if self.surface_width() <= 2.0 * self.hazard_inset {
            return Err(RunnerError::InvalidTuning {
                field: "hazard_inset",
                requirement: "less than half the surface width",
            });
        }
        if self.landing_tolerance < self.gravity {
            return Err(RunnerError::InvalidTuning {
                field: "landing_tolerance",
                requirement: "at least one tick of gravity",
            });
        }
        Ok(())
    }

    /// Width of a stage landing surface
    #[inline]
    pub fn surface_width(&self) -> f32 {
        self.segment_width - self.segment_gap
    }

    /// Width of the terminal finish surface (at least one screen of runway)
    #[inline]
    pub fn finish_width(&self) -> f32 {
        self.viewport_width + self.look_ahead_margin
    }

    /// Spawn cursor positions below this trigger a new segment
    #[inline]
    pub fn look_ahead_limit(&self) -> f32 {
        self.viewport_width + self.look_ahead_margin
    }

    /// Agent y beyond which the run is lost
    #[inline]
    pub fn void_threshold(&self) -> f32 {
        self.viewport_height + self.void_margin
    }

    /// Highest the agent's bottom edge can rise above its take-off point
    #[inline]
    pub fn max_jump_apex(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity)
    }
}
