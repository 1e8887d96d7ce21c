//! Post-run feedback collaborators
//!
//! After a run ends the player can say whether the simulated pipeline matches
//! their reality. A responder (typically an LLM behind some transport) writes
//! a short coaching reply, and a store records the report. Both are external:
//! this module defines their seams and the fallback behaviour around them.
//! Nothing here is ever called from inside a tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::RunPhase;

/// Reply when the responder fails
pub const FALLBACK_RESPONSE: &str =
    "Thanks for your feedback! Our sales enablement team will review it.";
/// Reply when the responder has no credentials
pub const MISSING_KEY_RESPONSE: &str = "Error: API Key missing. Unable to contact Sales Ops.";
/// Reply when the responder answers with nothing
pub const EMPTY_RESPONSE: &str = "Feedback received. Updating the playbook.";
/// Substituted for blank feedback text
pub const NO_DETAILS: &str = "No specific details provided.";

pub const PROMPT_TEMPLATE: &str = r#"
You are a renowned Sales Thought Leader and Coach.
A user has just played through a game simulating a sales process and provided feedback on whether it matches their reality.

User's Feedback: "{feedback}"
User's Validated Flow Status: "{status}" (Correct or Incorrect)

Your goal:
1. Acknowledge their perspective.
2. If they said the flow is WRONG, validate their insight (make them feel smart for spotting the gap).
3. Provide a brief, high-level insight about modern sales processes that relates to their feedback.
4. Keep it professional, encouraging, and concise (max 3 sentences).
"#;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("API key missing")]
    MissingApiKey,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Player's verdict on the simulated flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackStatus {
    Correct,
    Incorrect,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Correct => "Correct",
            FeedbackStatus::Incorrect => "Incorrect",
        }
    }
}

/// What the feedback screen should start from after a run
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackContext {
    /// Stage the run ended in
    pub stage: String,
    pub phase: RunPhase,
    pub suggested_status: Option<FeedbackStatus>,
    pub suggested_text: String,
}

/// A stored feedback report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub status: FeedbackStatus,
    pub text: String,
    pub stage_context: String,
    /// Unix milliseconds
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

/// Generates a reply to a rendered prompt
pub trait FeedbackResponder {
    fn respond(&self, prompt: &str) -> Result<String, FeedbackError>;
}

/// Persists feedback reports
pub trait FeedbackStore {
    fn save(&self, record: &FeedbackRecord) -> Result<Acknowledgement, FeedbackError>;
}

/// Fill the coaching prompt
pub fn render_prompt(status: FeedbackStatus, text: &str) -> String {
    let feedback = if text.trim().is_empty() {
        NO_DETAILS
    } else {
        text
    };
    PROMPT_TEMPLATE
        .replace("{status}", status.as_str())
        .replace("{feedback}", feedback)
}

/// Error code a host passes to [`RelayedReply`] when it has no credentials
pub const MISSING_KEY_CODE: &str = "missing_api_key";

/// Responder for hosts that call the coaching service themselves.
///
/// The browser fetches asynchronously, so the page renders the prompt, makes
/// the call, and hands back either the reply or an error code. Running that
/// outcome through a [`FeedbackDesk`] gives it the same fallbacks as any other
/// responder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayedReply {
    pub reply: Option<String>,
    pub error: Option<String>,
}

impl FeedbackResponder for RelayedReply {
    fn respond(&self, _prompt: &str) -> Result<String, FeedbackError> {
        match &self.error {
            Some(code) if code == MISSING_KEY_CODE => Err(FeedbackError::MissingApiKey),
            Some(message) => Err(FeedbackError::Transport(message.clone())),
            None => Ok(self.reply.clone().unwrap_or_default()),
        }
    }
}

/// Store that only logs, acknowledging every report
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedbackStore;

impl FeedbackStore for LogFeedbackStore {
    fn save(&self, record: &FeedbackRecord) -> Result<Acknowledgement, FeedbackError> {
        log::info!(
            "FEEDBACK SUBMITTED: {}",
            serde_json::to_string(record)?
        );
        Ok(Acknowledgement {
            success: true,
            message: "Feedback recorded locally.".to_string(),
        })
    }
}

/// Wraps the collaborators so their failures never reach the player as errors
pub struct FeedbackDesk<R, S> {
    responder: R,
    store: S,
}

impl<R: FeedbackResponder, S: FeedbackStore> FeedbackDesk<R, S> {
    pub fn new(responder: R, store: S) -> Self {
        Self { responder, store }
    }

    /// Ask the responder for a reply; always returns something printable
    pub fn submit_feedback(&self, status: FeedbackStatus, text: &str) -> String {
        let prompt = render_prompt(status, text);
        match self.responder.respond(&prompt) {
            Ok(reply) if reply.trim().is_empty() => EMPTY_RESPONSE.to_string(),
            Ok(reply) => reply,
            Err(FeedbackError::MissingApiKey) => {
                log::warn!("Feedback responder has no API key");
                MISSING_KEY_RESPONSE.to_string()
            }
            Err(e) => {
                log::warn!("Feedback responder failed: {}", e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    /// Record a report. Failures are logged and reported as unsuccessful.
    pub fn save_feedback(
        &self,
        status: FeedbackStatus,
        text: &str,
        stage_context: &str,
        timestamp: f64,
    ) -> Acknowledgement {
        let record = FeedbackRecord {
            status,
            text: text.to_string(),
            stage_context: stage_context.to_string(),
            timestamp,
        };
        self.store.save(&record).unwrap_or_else(|e| {
            log::warn!("Failed to save feedback: {}", e);
            Acknowledgement {
                success: false,
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Echo;
    impl FeedbackResponder for Echo {
        fn respond(&self, prompt: &str) -> Result<String, FeedbackError> {
            Ok(prompt.to_string())
        }
    }

    struct Failing(fn() -> FeedbackError);
    impl FeedbackResponder for Failing {
        fn respond(&self, _prompt: &str) -> Result<String, FeedbackError> {
            Err((self.0)())
        }
    }
    impl FeedbackStore for Failing {
        fn save(&self, _record: &FeedbackRecord) -> Result<Acknowledgement, FeedbackError> {
            Err((self.0)())
        }
    }

    #[derive(Default)]
    struct Recording(RefCell<Vec<FeedbackRecord>>);
    impl FeedbackStore for Recording {
        fn save(&self, record: &FeedbackRecord) -> Result<Acknowledgement, FeedbackError> {
            self.0.borrow_mut().push(record.clone());
            Ok(Acknowledgement {
                success: true,
                message: "ok".into(),
            })
        }
    }

    #[test]
    fn test_render_prompt() {
        let prompt = render_prompt(FeedbackStatus::Incorrect, "We need a POC stage");
        assert!(prompt.contains("User's Feedback: \"We need a POC stage\""));
        assert!(prompt.contains("Status: \"Incorrect\""));

        let blank = render_prompt(FeedbackStatus::Correct, "   ");
        assert!(blank.contains(NO_DETAILS));
    }

    #[test]
    fn test_submit_passes_reply_through() {
        let desk = FeedbackDesk::new(Echo, LogFeedbackStore);
        let reply = desk.submit_feedback(FeedbackStatus::Correct, "Looks right");
        assert!(reply.contains("Looks right"));
    }

    #[test]
    fn test_submit_falls_back_on_failure() {
        let desk = FeedbackDesk::new(
            Failing(|| FeedbackError::Transport("timeout".into())),
            LogFeedbackStore,
        );
        assert_eq!(
            desk.submit_feedback(FeedbackStatus::Incorrect, "x"),
            FALLBACK_RESPONSE
        );

        let desk = FeedbackDesk::new(Failing(|| FeedbackError::MissingApiKey), LogFeedbackStore);
        assert_eq!(
            desk.submit_feedback(FeedbackStatus::Incorrect, "x"),
            MISSING_KEY_RESPONSE
        );
    }

    #[test]
    fn test_submit_empty_reply() {
        struct Silent;
        impl FeedbackResponder for Silent {
            fn respond(&self, _prompt: &str) -> Result<String, FeedbackError> {
                Ok(String::new())
            }
        }
        let desk = FeedbackDesk::new(Silent, LogFeedbackStore);
        assert_eq!(desk.submit_feedback(FeedbackStatus::Correct, ""), EMPTY_RESPONSE);
    }

    #[test]
    fn test_save_records_context() {
        let desk = FeedbackDesk::new(Echo, Recording::default());
        let ack = desk.save_feedback(FeedbackStatus::Incorrect, "Missing POC", "Closing", 1.0);
        assert!(ack.success);
        let saved = desk.store.0.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].stage_context, "Closing");
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let desk = FeedbackDesk::new(
            Echo,
            Failing(|| FeedbackError::Transport("disk full".into())),
        );
        let ack = desk.save_feedback(FeedbackStatus::Correct, "", "Renewal", 1.0);
        assert!(!ack.success);
    }

    #[test]
    fn test_relayed_reply_fallbacks() {
        let relayed = |reply: Option<&str>, error: Option<&str>| {
            let desk = FeedbackDesk::new(
                RelayedReply {
                    reply: reply.map(str::to_string),
                    error: error.map(str::to_string),
                },
                LogFeedbackStore,
            );
            desk.submit_feedback(FeedbackStatus::Incorrect, "Missing POC")
        };

        assert_eq!(relayed(Some("Great catch."), None), "Great catch.");
        assert_eq!(relayed(None, None), EMPTY_RESPONSE);
        assert_eq!(relayed(Some("  "), None), EMPTY_RESPONSE);
        assert_eq!(relayed(None, Some(MISSING_KEY_CODE)), MISSING_KEY_RESPONSE);
        assert_eq!(relayed(None, Some("HTTP 503")), FALLBACK_RESPONSE);
        // An error wins over a partial reply
        assert_eq!(relayed(Some("partial"), Some("timeout")), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_relayed_desk_saves_through_store() {
        let desk = FeedbackDesk::new(RelayedReply::default(), Recording::default());
        let ack = desk.save_feedback(FeedbackStatus::Correct, "Accurate", "Renewal", 2.0);
        assert!(ack.success);
        assert_eq!(desk.store.0.borrow()[0].text, "Accurate");
    }

    #[test]
    fn test_log_store_acknowledges() {
        let record = FeedbackRecord {
            status: FeedbackStatus::Correct,
            text: "It looks accurate.".into(),
            stage_context: "REVENUE MOUNTAIN".into(),
            timestamp: 0.0,
        };
        let ack = LogFeedbackStore.save(&record).unwrap();
        assert!(ack.success);
    }
}
