//! Host-facing run controller
//!
//! Owns the catalog, tuning and the single [`RunState`]. The host calls
//! [`Runner::tick`] once per display refresh while the phase is Running,
//! forwards input to [`Runner::jump`] / [`Runner::reset`], and renders from
//! [`Runner::project`].

use crate::catalog::{HazardTier, StageCatalog};
use crate::feedback::{FeedbackContext, FeedbackStatus};
use crate::sim::{self, FailureCause, Projection, RunEvent, RunPhase, RunState};
use crate::tuning::Tuning;

/// Outcome of a finished run, for leaderboards
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub score: u64,
    pub stage: String,
    pub succeeded: bool,
}

pub struct Runner {
    catalog: StageCatalog,
    tuning: Tuning,
    seed: u64,
    runs_started: u64,
    state: RunState,
}

impl Runner {
    pub fn new(catalog: StageCatalog, tuning: Tuning, seed: u64) -> Self {
        let state = RunState::idle(seed, &tuning);
        Self {
            catalog,
            tuning,
            seed,
            runs_started: 0,
            state,
        }
    }

    /// Default pipeline with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StageCatalog::default_pipeline(), Tuning::default(), seed)
    }

    /// Begin a run from Idle (same as [`Runner::reset`])
    pub fn start(&mut self) {
        self.reset();
    }

    /// Replace the run state with a fresh Running one, whatever the phase
    pub fn reset(&mut self) {
        // Each run gets its own stream; the same runner seed replays the same sequence of worlds
        let run_seed = self
            .seed
            .wrapping_add(self.runs_started.wrapping_mul(2654435761));
        self.runs_started += 1;
        self.state = sim::reset_run(&self.catalog, &self.tuning, run_seed);
    }

    /// Jump if grounded. Returns whether the jump took effect.
    pub fn jump(&mut self) -> bool {
        if self.state.phase != RunPhase::Running {
            return false;
        }
        let jumped = sim::jump(&mut self.state.agent, &self.tuning);
        if !jumped {
            log::trace!("Jump ignored: agent airborne");
        }
        jumped
    }

    /// Advance one frame. Ignored unless Running.
    pub fn tick(&mut self) {
        sim::tick(&mut self.state, &self.catalog, &self.tuning);
    }

    pub fn project(&self) -> Projection {
        sim::project(&self.state, &self.tuning)
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[RunEvent] {
        &self.state.events
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Result of the run, once it has ended
    pub fn summary(&self) -> Option<RunSummary> {
        self.state.phase.is_terminal().then(|| RunSummary {
            score: self.state.score(),
            stage: self.state.current_stage.clone(),
            succeeded: self.state.phase == RunPhase::Succeeded,
        })
    }

    /// What the post-run feedback flow should show. None while a run is live.
    ///
    /// Dying on an authored wall pre-fills an "Incorrect" report naming it.
    pub fn feedback_context(&self) -> Option<FeedbackContext> {
        if !self.state.phase.is_terminal() {
            return None;
        }
        let stage = self.state.current_stage.clone();
        let (suggested_status, suggested_text) = match &self.state.failure {
            Some(FailureCause::Hazard {
                label,
                tier: HazardTier::Impossible,
            }) => (
                Some(FeedbackStatus::Incorrect),
                format!("An {label} at the {stage} stage is impossible to overcome."),
            ),
            _ => (None, String::new()),
        };
        Some(FeedbackContext {
            stage,
            phase: self.state.phase,
            suggested_status,
            suggested_text,
        })
    }
}
