//! Browser bindings
//!
//! The page owns the animation-frame loop and the key/touch listeners; it
//! calls `tick` once per frame while `is_running` and reads `project` as JSON.

use wasm_bindgen::prelude::*;

use crate::feedback::{
    FeedbackDesk, FeedbackStatus, LogFeedbackStore, RelayedReply, render_prompt,
};
use crate::highscores::HighScores;
use crate::runner::Runner;
use crate::sim::RunPhase;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Pipeline Runner starting...");
}

#[wasm_bindgen]
pub struct WebRunner {
    runner: Runner,
    scores: HighScores,
    recorded: bool,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> WebRunner {
        WebRunner {
            runner: Runner::with_seed(seed as u64),
            scores: HighScores::load(),
            recorded: false,
        }
    }

    /// Start or restart a run
    pub fn reset(&mut self) {
        self.runner.reset();
        self.recorded = false;
    }

    pub fn jump(&mut self) -> bool {
        self.runner.jump()
    }

    /// Advance one frame; returns whether the run is still live
    pub fn tick(&mut self) -> bool {
        self.runner.tick();
        if let Some(summary) = self.runner.summary() {
            if !self.recorded {
                self.recorded = true;
                if self.scores.record(&summary, js_sys::Date::now()).is_some() {
                    self.scores.save();
                }
            }
        }
        self.runner.phase() == RunPhase::Running
    }

    pub fn is_running(&self) -> bool {
        self.runner.phase() == RunPhase::Running
    }

    pub fn phase(&self) -> String {
        self.runner.phase().as_str().to_string()
    }

    /// Current snapshot as JSON
    pub fn project(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.project()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn high_scores(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.scores).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stage the run ended in, or empty while running
    pub fn feedback_stage(&self) -> String {
        self.runner
            .feedback_context()
            .map(|c| c.stage)
            .unwrap_or_default()
    }

    /// Pre-filled report text for the feedback form
    pub fn suggested_feedback(&self) -> String {
        self.runner
            .feedback_context()
            .map(|c| c.suggested_text)
            .unwrap_or_default()
    }

    /// Coaching prompt for the page to forward to its responder
    pub fn feedback_prompt(&self, correct: bool, text: &str) -> String {
        render_prompt(status_of(correct), text)
    }

    /// Reply to show the player, given the outcome of the page's call to the
    /// coaching service. `error` is `"missing_api_key"` or any other message.
    pub fn feedback_reply(
        &self,
        correct: bool,
        text: &str,
        reply: Option<String>,
        error: Option<String>,
    ) -> String {
        FeedbackDesk::new(RelayedReply { reply, error }, LogFeedbackStore)
            .submit_feedback(status_of(correct), text)
    }

    /// Log a feedback report. Ignored while a run is live.
    pub fn save_feedback(&self, correct: bool, text: &str) -> bool {
        let Some(context) = self.runner.feedback_context() else {
            log::warn!("Feedback ignored: run still in progress");
            return false;
        };
        FeedbackDesk::new(RelayedReply::default(), LogFeedbackStore)
            .save_feedback(
                status_of(correct),
                text,
                &context.stage,
                js_sys::Date::now(),
            )
            .success
    }
}

fn status_of(correct: bool) -> FeedbackStatus {
    if correct {
        FeedbackStatus::Correct
    } else {
        FeedbackStatus::Incorrect
    }
}
