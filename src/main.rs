//! Pipeline Runner entry point
//!
//! On the web the page drives `pipeline_runner::web::WebRunner`. Natively this
//! binary is a headless driver: it plays a run with the autopilot and logs the
//! outcome, optionally with custom tuning and catalog files.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::Context;
    use clap::Parser;

    use pipeline_runner::feedback::{
        FeedbackDesk, FeedbackError, FeedbackResponder, FeedbackStatus, LogFeedbackStore,
    };
    use pipeline_runner::sim::{RunEvent, RunPhase};
    use pipeline_runner::{HighScores, Runner, StageCatalog, Tuning, autopilot};

    #[derive(Parser, Debug)]
    #[command(name = "pipeline-runner")]
    #[command(about = "Headless pipeline runner: plays runs with the autopilot", long_about = None)]
    struct Args {
        /// World seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Number of runs to play
        #[arg(long, default_value_t = 1)]
        runs: u32,

        /// Safety cap on ticks per run
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,

        /// JSON tuning override
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// JSON stage catalog (defaults to the sales pipeline)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Feedback to submit after the last run
        #[arg(long)]
        feedback: Option<String>,
    }

    /// Offline stand-in for the coaching service
    struct OfflineCoach;

    impl FeedbackResponder for OfflineCoach {
        fn respond(&self, _prompt: &str) -> Result<String, FeedbackError> {
            if std::env::var_os("API_KEY").is_none() {
                return Err(FeedbackError::MissingApiKey);
            }
            Err(FeedbackError::Transport(
                "no coaching service in headless mode".to_string(),
            ))
        }
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();

        let tuning = match &args.tuning {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading tuning {}", path.display()))?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };
        let catalog = match &args.catalog {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading catalog {}", path.display()))?;
                StageCatalog::from_json(&json)?
            }
            None => StageCatalog::default_pipeline(),
        };

        let mut runner = Runner::new(catalog, tuning, args.seed);
        let mut scores = HighScores::load();

        for run in 1..=args.runs {
            runner.start();
            while runner.phase() == RunPhase::Running && runner.state().time_ticks < args.max_ticks {
                autopilot::steer(&mut runner);
                runner.tick();
                for event in runner.events() {
                    if let RunEvent::StageEntered { title } = event {
                        log::info!("Run {}: entered '{}'", run, title);
                    }
                }
            }

            let Some(summary) = runner.summary() else {
                log::warn!("Run {} hit the tick cap still running", run);
                continue;
            };
            println!(
                "Run {}: {} in '{}' with score {}",
                run,
                if summary.succeeded { "succeeded" } else { "failed" },
                summary.stage,
                summary.score
            );
            if let Some(rank) = scores.record(&summary, now_ms()) {
                println!("  New high score, rank {}", rank);
            }
        }
        scores.save();

        if let Some(context) = runner.feedback_context() {
            let desk = FeedbackDesk::new(OfflineCoach, LogFeedbackStore);
            let (status, text) = match &args.feedback {
                Some(text) => (FeedbackStatus::Incorrect, text.clone()),
                None => (
                    context.suggested_status.unwrap_or(FeedbackStatus::Correct),
                    context.suggested_text.clone(),
                ),
            };
            desk.save_feedback(status, &text, &context.stage, now_ms());
            println!("{}", desk.submit_feedback(status, &text));
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Pipeline Runner (headless) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
